//! Chartsmith - Turn loosely-structured tabular input into a chart
//!
//! Raw text, CSV, spreadsheet or image bytes go in. A parsed table, a
//! resolved chart configuration and a declarative plotly-style figure come
//! out.
//!
//! # Quick Start
//!
//! ```rust
//! use chartsmith::create_chart;
//!
//! let chart = create_chart("Category,Value\nA,10\nB,20\nC,15", None, "auto", None, None, None)
//!     .unwrap();
//! assert_eq!(chart.config.chart_type.as_str(), "pie");
//! println!("{}", chart.figure.to_json().unwrap());
//! ```
//!
//! # Advanced Usage
//!
//! For more control, build an [`Orchestrator`](plugins::Orchestrator) once
//! and reuse it, or drive the individual stages:
//!
//! ```rust
//! use chartsmith::prelude::*;
//!
//! let table = TextParser::new().parse_text("X,Y\n1,10\n2,20").unwrap();
//!
//! let catalog = ChartTypeCatalog::with_default_types();
//! let kind = catalog.infer_best_type(&table).unwrap();
//! assert_eq!(kind, ChartKind::Scatter);
//!
//! let config = catalog.get_kind(kind).unwrap().default_config(&table);
//! let figure = RenderPipeline::with_defaults().render(&table, &config).unwrap();
//! assert_eq!(figure.traces().len(), 1);
//! ```

pub mod core;
pub mod export;
pub mod plugins;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ChartConfig, ChartError, ChartKind, ChartRenderer, ChartType, Figure, FigureAddon,
        ParsedTable, RawInput, Settings, SourceKind, Table, TableParser,
    };
    pub use crate::export::{embed_html, python_script, FigureStore};
    pub use crate::plugins::{
        ChartTypeCatalog, CreatedChart, CsvParser, ImageParser, Orchestrator, ParserRegistry,
        RenderPipeline, SpreadsheetParser, TextParser,
    };
}

/// Create a chart with the default orchestrator
///
/// `chart_type` is `"auto"` or a chart type name such as `"bar"`. `title`,
/// `x_column` and `y_columns` override the resolved configuration when given.
///
/// # Example
/// ```rust
/// use chartsmith::create_chart;
///
/// let text = "Date,Value\n2025-01-01,100\n2025-01-02,150";
/// let chart = create_chart(text, None, "auto", Some("Daily"), None, None).unwrap();
/// assert_eq!(chart.config.chart_type.as_str(), "line");
/// assert_eq!(chart.figure.layout().title_text(), Some("Daily"));
/// ```
pub fn create_chart(
    input: impl Into<RawInput>,
    filename: Option<&str>,
    chart_type: &str,
    title: Option<&str>,
    x_column: Option<&str>,
    y_columns: Option<&[String]>,
) -> anyhow::Result<plugins::CreatedChart> {
    let orchestrator = plugins::Orchestrator::default();
    let chart = orchestrator.create_chart(
        &input.into(),
        filename,
        chart_type,
        title,
        x_column,
        y_columns,
    )?;
    Ok(chart)
}

/// Names of the built-in chart types in registration order
pub fn list_chart_types() -> Vec<String> {
    plugins::ChartTypeCatalog::with_default_types().list_types()
}

/// Names of the built-in parsers in priority order
pub fn list_parsers() -> Vec<String> {
    plugins::ParserRegistry::with_default_parsers().list_parsers()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_chart_auto() {
        let chart = create_chart("Category,Value\nA,10\nB,20\nC,15", None, "auto", None, None, None)
                .unwrap();
        assert_eq!(chart.config.chart_type, ChartKind::Pie);
        assert_eq!(chart.figure.traces().len(), 1);
    }

    #[test]
    fn test_create_chart_bytes_with_filename() {
        let chart = create_chart(b"a,b\nx,1\ny,2".to_vec(), Some("data.csv"), "bar", None, None, None)
                .unwrap();
        assert_eq!(chart.parsed.source_kind(), SourceKind::Csv);
    }

    #[test]
    fn test_create_chart_error_downcasts() {
        let err = create_chart("a,b\nx,1", None, "histogram", None, None, None).unwrap_err();
        let chart_err = err.downcast_ref::<ChartError>().unwrap();
        assert!(matches!(chart_err, ChartError::UnknownChartType { .. }));
        assert!(chart_err.is_validation());
    }

    #[test]
    fn test_create_chart_overrides() {
        let ys = vec!["Cost".to_string()];
        let chart = create_chart(
            "Region,Sales,Cost\nN,10,4\nS,12,5",
            None,
            "bar",
            Some("Costs"),
            Some("Region"),
            Some(&ys),
        )
        .unwrap();
        assert_eq!(chart.config.x_column.as_deref(), Some("Region"));
        assert_eq!(chart.config.y_columns, vec!["Cost"]);
        assert_eq!(chart.figure.traces().len(), 1);
        assert_eq!(chart.figure.layout().title_text(), Some("Costs"));
    }

    #[test]
    fn test_create_chart_unknown_override_column() {
        let err = create_chart("a,b\nx,1", None, "bar", None, Some("missing"), None)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChartError>(),
            Some(ChartError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_listings() {
        assert_eq!(list_chart_types(), vec!["line", "bar", "scatter", "pie"]);
        assert_eq!(list_parsers(), vec!["spreadsheet", "csv", "image", "text"]);
    }
}
