//! Line chart plugin
//!
//! Time series and other ordered data, one line per numeric column.

mod renderer;

pub use renderer::LineRenderer;

use super::bindings::{join_series, line_bindings, value_label};
use crate::core::{ChartConfig, ChartKind, ChartType, Table};

/// Line chart descriptor
#[derive(Debug, Clone, Copy, Default)]
pub struct LineChart;

impl LineChart {
    pub fn new() -> Self {
        Self
    }
}

impl ChartType for LineChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn display_name(&self) -> &'static str {
        "Line Chart"
    }

    fn is_suitable_for(&self, table: &Table) -> bool {
        !table.numeric_columns().is_empty() && table.row_count() >= 2
    }

    fn default_config(&self, table: &Table) -> ChartConfig {
        let (x, ys) = line_bindings(table, None);

        let title = if ys.is_empty() {
            "Line Chart".to_string()
        } else {
            format!("{} over {}", join_series(&ys), x)
        };

        ChartConfig {
            chart_type: ChartKind::Line,
            x_label: Some(x.clone()),
            y_label: Some(value_label(&ys)),
            title: Some(title),
            x_column: Some(x),
            y_columns: ys,
            ..ChartConfig::default()
        }
    }
}
