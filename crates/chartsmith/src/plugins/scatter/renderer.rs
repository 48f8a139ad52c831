//! Scatter chart renderer

use tracing::{debug, span, Level};

use crate::core::{
    ChartConfig, ChartError, ChartKind, ChartRenderer, Figure, Result, Table, TraceType,
};
use crate::plugins::bindings::{column, numeric_excluding, series_trace, stamp_layout, x_or_first};

/// Renders a single `markers`-mode trace for the first y column
#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterRenderer;

impl ScatterRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ChartRenderer for ScatterRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Scatter
    }

    fn render(&self, table: &Table, config: &ChartConfig) -> Result<Figure> {
        let render_span = span!(Level::DEBUG, "render_scatter");
        let _enter = render_span.enter();

        let mut x_name = x_or_first(table, config);
        let mut ys = if config.y_columns.is_empty() {
            numeric_excluding(table, &x_name)
        } else {
            config.y_columns.clone()
        };
        if ys.is_empty() {
            let numeric = table.numeric_columns();
            if numeric.len() >= 2 {
                x_name = numeric[0].to_string();
                ys = vec![numeric[1].to_string()];
            }
        }

        let y_name = ys.first().ok_or_else(|| {
            ChartError::invalid_config("scatter chart needs a numeric column for the y axis")
        })?;
        let x = column(table, &x_name)?;
        let mut trace = series_trace(TraceType::Scatter, x, column(table, y_name)?);
        trace.mode = Some("markers".to_string());

        let mut figure = Figure::new();
        figure.add_trace(trace);
        stamp_layout(
            &mut figure,
            config,
            format!("{} vs {}", y_name, x_name),
            Some((x_name.clone(), y_name.clone())),
        );

        debug!(x = %x_name, y = %y_name, "Rendered scatter chart");
        Ok(figure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::parsers::TextParser;

    #[test]
    fn test_markers_trace() {
        let table = TextParser::new()
            .parse_text("X,Y\n1,10\n2,20\n3,15\n4,25")
            .unwrap();
        let figure = ScatterRenderer::new()
            .render(&table, &ChartConfig::new(ChartKind::Scatter))
            .unwrap();
        assert_eq!(figure.traces().len(), 1);
        assert_eq!(figure.traces()[0].mode.as_deref(), Some("markers"));
        assert_eq!(figure.layout().title_text(), Some("Y vs X"));
    }

    #[test]
    fn test_only_first_y_is_drawn() {
        let table = TextParser::new().parse_text("a,b,c\n1,2,3").unwrap();
        let config = ChartConfig::new(ChartKind::Scatter).with_y_columns(["c", "b"]);
        let figure = ScatterRenderer::new().render(&table, &config).unwrap();
        assert_eq!(figure.traces().len(), 1);
        assert_eq!(figure.traces()[0].name.as_deref(), Some("c"));
    }

    #[test]
    fn test_no_numeric_columns() {
        let table = TextParser::new().parse_text("a,b\nx,y").unwrap();
        assert!(matches!(
            ScatterRenderer::new().render(&table, &ChartConfig::new(ChartKind::Scatter)),
            Err(ChartError::InvalidConfig { .. })
        ));
    }
}
