//! Pie chart renderer

use tracing::{debug, span, Level};

use super::pie_bindings;
use crate::core::{
    ChartConfig, ChartError, ChartKind, ChartRenderer, Figure, Result, Table, Trace, TraceType,
};
use crate::plugins::bindings::{column, stamp_layout};

/// Renders a single pie trace of labels and values
#[derive(Debug, Clone, Copy, Default)]
pub struct PieRenderer;

impl PieRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ChartRenderer for PieRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    fn render(&self, table: &Table, config: &ChartConfig) -> Result<Figure> {
        let render_span = span!(Level::DEBUG, "render_pie");
        let _enter = render_span.enter();

        let (derived_names, derived_values) = pie_bindings(table);
        let names_name = config.x_column.clone().unwrap_or(derived_names);
        let values_name = config
            .y_columns
            .first()
            .cloned()
            .or(derived_values)
            .ok_or_else(|| ChartError::invalid_config("pie chart needs a values column"))?;

        let names = column(table, &names_name)?;
        let values = column(table, &values_name)?;
        if !values.is_numeric() {
            return Err(ChartError::invalid_config(format!(
                "pie values column '{}' is not numeric",
                values_name
            )));
        }

        let mut trace = Trace::new(TraceType::Pie);
        trace.labels = Some(names.cells());
        trace.values = Some(values.cells());

        let mut figure = Figure::new();
        figure.add_trace(trace);
        stamp_layout(
            &mut figure,
            config,
            format!("{} Distribution by {}", values_name, names_name),
            None,
        );

        debug!(names = %names_name, values = %values_name, "Rendered pie chart");
        Ok(figure)
    }
}
