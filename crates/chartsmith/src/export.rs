//! Figure export helpers for the layers above the pipeline
//!
//! Nothing in the chart pipeline depends on this module. It turns a finished
//! [`Figure`] into something a front end can show, writes a script that
//! reproduces a chart, and gives callers an explicit place to keep figures
//! between requests.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, span, trace, Level};
use uuid::Uuid;

use crate::core::{CellValue, ChartConfig, ChartError, ChartKind, Figure, Result, Table};

/// plotly.js bundle referenced by [`embed_html`]
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// A standalone HTML page drawing the figure with plotly.js
pub fn embed_html(figure: &Figure) -> Result<String> {
    // keep the payload from closing the script element early
    let payload = figure.to_json()?.replace("</", "<\\/");
    let title = escape_html(figure.layout().title_text().unwrap_or("Chart"));

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:100%;"></div>
<script>
const figure = {payload};
Plotly.newPlot("chart", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#,
        title = title,
        cdn = PLOTLY_CDN,
        payload = payload,
    ))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A standalone Python script reproducing the chart with plotly express
///
/// The table is embedded as a dict literal. Pie charts bind the x column to
/// `names` and the first y column to `values`; other kinds pass a single y
/// column as a string and several as a list. Without a configured title the
/// script uses the same defaults the chart types derive.
pub fn python_script(table: &Table, config: &ChartConfig) -> Result<String> {
    let export_span = span!(
        Level::DEBUG,
        "python_script",
        chart_type = config.chart_type.as_str()
    );
    let _enter = export_span.enter();

    let x = config
        .x_column
        .as_deref()
        .ok_or_else(|| ChartError::invalid_config("Code export needs an x column"))?;
    for name in std::iter::once(x).chain(config.y_columns.iter().map(String::as_str)) {
        if !table.has_column(name) {
            return Err(ChartError::UnknownColumn {
                column: name.to_string(),
                available: table.column_names().into_iter().map(str::to_string).collect(),
            });
        }
    }

    let plot_call = plot_call(x, config)?;
    let script = format!(
        r#""""
Generated chart script.
Run this script to reproduce the chart.
"""

import pandas as pd
import plotly.express as px


def load_data():
    """Load the chart data."""
    data = {data}
    return pd.DataFrame(data)


def plot_chart():
    """Create and display the chart."""
    df = load_data()
    {plot_call}
    fig.update_layout(template={template})
    fig.show()
    return fig


if __name__ == "__main__":
    plot_chart()
"#,
        data = data_literal(table),
        plot_call = plot_call,
        template = py_str(&config.template),
    );
    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        "Generated script"
    );
    Ok(script)
}

fn plot_call(x: &str, config: &ChartConfig) -> Result<String> {
    let kind = config.chart_type;
    let title = |default: String| py_str(config.title.as_deref().unwrap_or(&default));

    let call = match (kind, config.y_columns.as_slice()) {
        (_, []) => {
            return Err(ChartError::invalid_config(format!(
                "{} code export needs at least one y column",
                kind.as_str()
            )))
        }
        (ChartKind::Pie, [values, ..]) => format!(
            "fig = px.pie(df, names={}, values={}, title={})",
            py_str(x),
            py_str(values),
            title(format!("{} Distribution", values))
        ),
        (_, [y]) => format!(
            "fig = px.{}(df, x={}, y={}, title={})",
            kind.as_str(),
            py_str(x),
            py_str(y),
            title(format!("{} by {}", y, x))
        ),
        (_, ys) => {
            let list: Vec<String> = ys.iter().map(|y| py_str(y)).collect();
            format!(
                "fig = px.{}(df, x={}, y=[{}], title={})",
                kind.as_str(),
                py_str(x),
                list.join(", "),
                title("Chart".to_string())
            )
        }
    };
    Ok(call)
}

fn data_literal(table: &Table) -> String {
    let mut literal = String::from("{\n");
    for column in table.columns() {
        let cells: Vec<String> = column.cells().iter().map(py_value).collect();
        literal.push_str(&format!(
            "        {}: [{}],\n",
            py_str(column.name()),
            cells.join(", ")
        ));
    }
    literal.push_str("    }");
    literal
}

/// JSON string escapes are valid Python string literal escapes
fn py_str(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

fn py_value(cell: &CellValue) -> String {
    match cell {
        CellValue::Integer(v) => v.to_string(),
        CellValue::Float(v) if v.is_nan() => "float(\"nan\")".to_string(),
        CellValue::Float(v) if v.is_infinite() => {
            let sign = if *v < 0.0 { "-" } else { "" };
            format!("float(\"{}inf\")", sign)
        }
        CellValue::Float(v) => format!("{:?}", v),
        CellValue::Text(s) => py_str(s),
        CellValue::Null => "None".to_string(),
    }
}

/// A figure kept in a [`FigureStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFigure {
    pub figure: Figure,
    pub created_at: DateTime<Utc>,
}

/// Caller-owned figure storage shareable across threads
#[derive(Debug, Default)]
pub struct FigureStore {
    figures: RwLock<HashMap<String, StoredFigure>>,
}

impl FigureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a figure, returning its id
    ///
    /// A new v4 UUID is generated when `id` is `None`. An existing entry
    /// under the same id is replaced.
    pub fn insert(&self, figure: Figure, id: Option<String>) -> String {
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let stored = StoredFigure {
            figure,
            created_at: Utc::now(),
        };
        let replaced = self.figures.write().insert(id.clone(), stored).is_some();
        debug!(id = %id, replaced, "Stored figure");
        id
    }

    pub fn get(&self, id: &str) -> Option<StoredFigure> {
        let found = self.figures.read().get(id).cloned();
        trace!(id, found = found.is_some(), "Figure lookup");
        found
    }

    pub fn remove(&self, id: &str) -> Option<StoredFigure> {
        self.figures.write().remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.figures.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.figures.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Title, Trace, TraceType};
    use std::sync::Arc;
    use std::thread;

    fn titled(text: &str) -> Figure {
        let mut figure = Figure::new();
        figure.add_trace(Trace::new(TraceType::Bar));
        figure.layout_mut().title = Some(Title::new(text));
        figure
    }

    #[test]
    fn test_embed_html_contains_figure() {
        let html = embed_html(&titled("Sales & Cost")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Sales &amp; Cost</title>"));
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains(r#""type":"bar""#));
        assert!(html.contains("Plotly.newPlot"));
    }

    #[test]
    fn test_embed_html_escapes_script_close() {
        let html = embed_html(&titled("</script><b>")).unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
        assert!(html.contains("<title>&lt;/script&gt;&lt;b&gt;</title>"));
    }

    fn sales() -> Table {
        Table::from_records(
            vec!["Category".to_string(), "Value".to_string(), "Cost".to_string()],
            vec![
                vec!["A".to_string(), "10".to_string(), "2.5".to_string()],
                vec!["B".to_string(), "20".to_string(), "".to_string()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_python_script_bar() {
        let config = ChartConfig::new(ChartKind::Bar)
            .with_x_column("Category")
            .with_y_columns(["Value"]);
        let script = python_script(&sales(), &config).unwrap();
        assert!(script.contains("import pandas as pd"));
        assert!(script.contains("import plotly.express as px"));
        assert!(script.contains("pd.DataFrame(data)"));
        assert!(script.contains(
            r#"fig = px.bar(df, x="Category", y="Value", title="Value by Category")"#
        ));
        assert!(script.contains(r#"fig.update_layout(template="plotly_white")"#));
        assert!(script.contains("fig.show()"));
        assert!(script.contains(r#"if __name__ == "__main__":"#));
    }

    #[test]
    fn test_python_script_data_literal() {
        let config = ChartConfig::new(ChartKind::Line)
            .with_x_column("Category")
            .with_y_columns(["Cost"]);
        let script = python_script(&sales(), &config).unwrap();
        assert!(script.contains(r#"        "Category": ["A", "B"],"#));
        assert!(script.contains(r#"        "Value": [10, 20],"#));
        assert!(script.contains(r#"        "Cost": [2.5, float("nan")],"#));
        assert!(script.contains("px.line"));
    }

    #[test]
    fn test_python_script_pie_and_multi_y() {
        let pie = ChartConfig::new(ChartKind::Pie)
            .with_x_column("Category")
            .with_y_columns(["Value"])
            .with_title("Pie Test");
        let script = python_script(&sales(), &pie).unwrap();
        assert!(script.contains(
            r#"fig = px.pie(df, names="Category", values="Value", title="Pie Test")"#
        ));

        let multi = ChartConfig::new(ChartKind::Bar)
            .with_x_column("Category")
            .with_y_columns(["Value", "Cost"]);
        let script = python_script(&sales(), &multi).unwrap();
        assert!(script.contains(r#"y=["Value", "Cost"], title="Chart")"#));
    }

    #[test]
    fn test_python_script_escapes_quotes() {
        let config = ChartConfig::new(ChartKind::Bar)
            .with_x_column("Category")
            .with_y_columns(["Value"])
            .with_title(r#"Say "hi""#);
        let script = python_script(&sales(), &config).unwrap();
        assert!(script.contains(r#"title="Say \"hi\"")"#));
    }

    #[test]
    fn test_python_script_rejects_unusable_config() {
        let no_x = ChartConfig::new(ChartKind::Bar).with_y_columns(["Value"]);
        assert!(matches!(
            python_script(&sales(), &no_x),
            Err(ChartError::InvalidConfig { .. })
        ));

        let no_y = ChartConfig::new(ChartKind::Line).with_x_column("Category");
        assert!(matches!(
            python_script(&sales(), &no_y),
            Err(ChartError::InvalidConfig { .. })
        ));

        let unknown = ChartConfig::new(ChartKind::Bar)
            .with_x_column("Category")
            .with_y_columns(["Revenue"]);
        assert!(matches!(
            python_script(&sales(), &unknown),
            Err(ChartError::UnknownColumn { column, .. }) if column == "Revenue"
        ));
    }

    #[test]
    fn test_store_generates_ids() {
        let store = FigureStore::new();
        assert!(store.is_empty());

        let first = store.insert(titled("a"), None);
        let second = store.insert(titled("b"), None);
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get(&second).unwrap().figure.layout().title_text(),
            Some("b")
        );
    }

    #[test]
    fn test_store_explicit_id_replaces() {
        let store = FigureStore::new();
        assert_eq!(store.insert(titled("a"), Some("chart-1".to_string())), "chart-1");
        store.insert(titled("b"), Some("chart-1".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("chart-1").unwrap().figure.layout().title_text(),
            Some("b")
        );

        assert!(store.remove("chart-1").is_some());
        assert!(!store.contains("chart-1"));
        assert!(store.get("chart-1").is_none());
    }

    #[test]
    fn test_store_shared_across_threads() {
        let store = Arc::new(FigureStore::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.insert(titled(&i.to_string()), None))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 4);
    }
}
