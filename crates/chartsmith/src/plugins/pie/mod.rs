//! Pie chart plugin
//!
//! Parts of a whole: category names from a text column, sector sizes from a
//! numeric column.

mod renderer;

pub use renderer::PieRenderer;

use crate::core::{ChartConfig, ChartKind, ChartType, Table};

/// Most categories for which a pie is considered suitable
pub const PIE_SUITABLE_MAX_CATEGORIES: usize = 15;

/// Pie chart descriptor
#[derive(Debug, Clone, Copy, Default)]
pub struct PieChart;

impl PieChart {
    pub fn new() -> Self {
        Self
    }
}

/// `(names, values)` columns for a pie over `table`
pub(crate) fn pie_bindings(table: &Table) -> (String, Option<String>) {
    let numeric = table.numeric_columns();
    let categorical = table.categorical_columns();
    let columns = table.column_names();

    match (categorical.first(), numeric.first()) {
        (Some(names), Some(values)) => (names.to_string(), Some(values.to_string())),
        _ => (
            columns[0].to_string(),
            columns.get(1).map(|s| s.to_string()),
        ),
    }
}

impl ChartType for PieChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    fn display_name(&self) -> &'static str {
        "Pie Chart"
    }

    fn is_suitable_for(&self, table: &Table) -> bool {
        let has_numeric = !table.numeric_columns().is_empty();
        match table.categorical_columns().first() {
            Some(names) if has_numeric => table
                .column(names)
                .map(|c| c.distinct_count() <= PIE_SUITABLE_MAX_CATEGORIES)
                .unwrap_or(false),
            _ => false,
        }
    }

    fn default_config(&self, table: &Table) -> ChartConfig {
        let (names, values) = pie_bindings(table);
        let values = values.unwrap_or_else(|| names.clone());

        ChartConfig {
            chart_type: ChartKind::Pie,
            title: Some(format!("{} Distribution by {}", values, names)),
            x_label: Some(names.clone()),
            y_label: Some(values.clone()),
            x_column: Some(names),
            y_columns: vec![values],
            ..ChartConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::parsers::TextParser;

    #[test]
    fn test_names_and_values() {
        let table = TextParser::new()
            .parse_text("Share,Fruit\n3,Apple\n5,Pear")
            .unwrap();
        let config = PieChart::new().default_config(&table);
        assert_eq!(config.x_column.as_deref(), Some("Fruit"));
        assert_eq!(config.y_columns, vec!["Share"]);
        assert_eq!(config.title.as_deref(), Some("Share Distribution by Fruit"));
    }

    #[test]
    fn test_fallback_to_first_columns() {
        let table = TextParser::new().parse_text("a,b\nx,y").unwrap();
        let config = PieChart::new().default_config(&table);
        assert_eq!(config.x_column.as_deref(), Some("a"));
        assert_eq!(config.y_columns, vec!["b"]);
    }

    #[test]
    fn test_suitability_threshold() {
        let rows: String = (0..16).map(|i| format!("\nc{},1", i)).collect();
        let many = TextParser::new().parse_text(&format!("k,v{}", rows)).unwrap();
        assert!(!PieChart::new().is_suitable_for(&many));

        let rows: String = (0..15).map(|i| format!("\nc{},1", i)).collect();
        let enough = TextParser::new().parse_text(&format!("k,v{}", rows)).unwrap();
        assert!(PieChart::new().is_suitable_for(&enough));
    }
}
