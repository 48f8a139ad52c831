//! Bar chart renderer

use tracing::{debug, span, Level};

use crate::core::{
    ChartConfig, ChartError, ChartKind, ChartRenderer, Figure, Result, Table, TraceType,
};
use crate::plugins::bindings::{
    column, join_series, numeric_excluding, series_trace, stamp_layout, value_label, x_or_first,
};

/// Renders one bar trace per y column
#[derive(Debug, Clone, Copy, Default)]
pub struct BarRenderer;

impl BarRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ChartRenderer for BarRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn render(&self, table: &Table, config: &ChartConfig) -> Result<Figure> {
        let render_span = span!(Level::DEBUG, "render_bar");
        let _enter = render_span.enter();

        let x_name = x_or_first(table, config);
        let x = column(table, &x_name)?;
        let ys = if config.y_columns.is_empty() {
            numeric_excluding(table, &x_name)
        } else {
            config.y_columns.clone()
        };
        if ys.is_empty() {
            return Err(ChartError::invalid_config(
                "bar chart needs at least one numeric column for the y axis",
            ));
        }

        let mut figure = Figure::new();
        for y_name in &ys {
            figure.add_trace(series_trace(TraceType::Bar, x, column(table, y_name)?));
        }
        if ys.len() > 1 {
            figure.layout_mut().barmode = Some("group".to_string());
        }

        stamp_layout(
            &mut figure,
            config,
            format!("{} by {}", join_series(&ys), x_name),
            Some((x_name.clone(), value_label(&ys))),
        );

        debug!(x = %x_name, series = ys.len(), "Rendered bar chart");
        Ok(figure)
    }
}
