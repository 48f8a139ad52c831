//! Line chart renderer

use tracing::{debug, span, Level};

use crate::core::{
    ChartConfig, ChartError, ChartKind, ChartRenderer, Figure, Result, Table, TraceType,
};
use crate::plugins::bindings::{
    column, join_series, line_bindings, series_trace, stamp_layout, value_label,
};

/// Renders one `lines`-mode scatter trace per y column
#[derive(Debug, Clone, Copy, Default)]
pub struct LineRenderer;

impl LineRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ChartRenderer for LineRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn render(&self, table: &Table, config: &ChartConfig) -> Result<Figure> {
        let render_span = span!(Level::DEBUG, "render_line");
        let _enter = render_span.enter();

        let (x_name, derived) = line_bindings(table, config.x_column.as_deref());
        let x = column(table, &x_name)?;
        let ys = if config.y_columns.is_empty() {
            derived
        } else {
            config.y_columns.clone()
        };
        if ys.is_empty() {
            return Err(ChartError::invalid_config(
                "line chart needs at least one numeric column for the y axis",
            ));
        }

        let mut figure = Figure::new();
        for y_name in &ys {
            let mut trace = series_trace(TraceType::Scatter, x, column(table, y_name)?);
            trace.mode = Some("lines".to_string());
            figure.add_trace(trace);
        }

        stamp_layout(
            &mut figure,
            config,
            format!("{} over {}", join_series(&ys), x_name),
            Some((x_name.clone(), value_label(&ys))),
        );

        debug!(x = %x_name, series = ys.len(), "Rendered line chart");
        Ok(figure)
    }
}
