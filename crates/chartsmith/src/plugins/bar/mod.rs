//! Bar chart plugin
//!
//! Categorical comparisons: one bar series per numeric column, grouped side
//! by side when there are several.

mod renderer;

pub use renderer::BarRenderer;

use super::bindings::{join_series, numeric_excluding, value_label};
use crate::core::{ChartConfig, ChartKind, ChartType, Table};

/// Most series a derived bar config binds
const MAX_SERIES: usize = 3;

/// Bar chart descriptor
#[derive(Debug, Clone, Copy, Default)]
pub struct BarChart;

impl BarChart {
    pub fn new() -> Self {
        Self
    }
}

impl ChartType for BarChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn display_name(&self) -> &'static str {
        "Bar Chart"
    }

    fn is_suitable_for(&self, table: &Table) -> bool {
        !table.numeric_columns().is_empty()
    }

    fn default_config(&self, table: &Table) -> ChartConfig {
        let numeric = table.numeric_columns();
        let categorical = table.categorical_columns();

        let (x, ys): (String, Vec<String>) = match categorical.first() {
            Some(first) => (
                first.to_string(),
                numeric
                    .iter()
                    .take(MAX_SERIES)
                    .map(|s| s.to_string())
                    .collect(),
            ),
            None => {
                let x = table.first_column().name().to_string();
                let mut ys = numeric_excluding(table, &x);
                ys.truncate(MAX_SERIES);
                if ys.is_empty() {
                    ys = numeric.iter().take(1).map(|s| s.to_string()).collect();
                }
                (x, ys)
            }
        };

        let title = if ys.is_empty() {
            "Bar Chart".to_string()
        } else {
            format!("{} by {}", join_series(&ys), x)
        };

        ChartConfig {
            chart_type: ChartKind::Bar,
            x_label: Some(x.clone()),
            y_label: Some(value_label(&ys)),
            title: Some(title),
            x_column: Some(x),
            y_columns: ys,
            ..ChartConfig::default()
        }
    }
}
