//! Scatter chart plugin
//!
//! Relationship between two numeric variables.

mod renderer;

pub use renderer::ScatterRenderer;

use crate::core::{ChartConfig, ChartKind, ChartType, Table};

/// Scatter chart descriptor
#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterChart;

impl ScatterChart {
    pub fn new() -> Self {
        Self
    }
}

impl ChartType for ScatterChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Scatter
    }

    fn display_name(&self) -> &'static str {
        "Scatter Chart"
    }

    fn is_suitable_for(&self, table: &Table) -> bool {
        table.numeric_columns().len() >= 2
    }

    fn default_config(&self, table: &Table) -> ChartConfig {
        let numeric = table.numeric_columns();

        let (x, ys): (String, Vec<String>) = if numeric.len() >= 2 {
            (numeric[0].to_string(), vec![numeric[1].to_string()])
        } else {
            (
                table.first_column().name().to_string(),
                numeric.iter().take(1).map(|s| s.to_string()).collect(),
            )
        };

        let (title, y_label) = match ys.first() {
            Some(y) => (format!("{} vs {}", y, x), y.clone()),
            None => ("Scatter Chart".to_string(), "Value".to_string()),
        };

        ChartConfig {
            chart_type: ChartKind::Scatter,
            x_label: Some(x.clone()),
            y_label: Some(y_label),
            title: Some(title),
            x_column: Some(x),
            y_columns: ys,
            ..ChartConfig::default()
        }
    }
}
