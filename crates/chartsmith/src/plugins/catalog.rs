//! Chart type catalog and the automatic selector
//!
//! The catalog holds one descriptor per chart type in registration order.
//! Automatic selection runs a fixed rule cascade over the table's shape;
//! every rule degrades to bar, and then to the first registered type, when
//! its target is not registered, so selection never fails on a non-empty
//! catalog.

use std::str::FromStr;
use tracing::{debug, span, trace, Level};

use super::bar::BarChart;
use super::line::LineChart;
use super::pie::PieChart;
use super::scatter::ScatterChart;
use crate::core::{ChartError, ChartKind, ChartType, Result, Settings, Table};

/// Ordered set of chart type descriptors
pub struct ChartTypeCatalog {
    types: Vec<Box<dyn ChartType>>,
    pie_max_categories: usize,
}

impl ChartTypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            pie_max_categories: Settings::default().pie_max_categories,
        }
    }

    /// Catalog with line, bar, scatter and pie registered
    pub fn with_default_types() -> Self {
        let mut catalog = Self::new();
        catalog.register(Box::new(LineChart::new()));
        catalog.register(Box::new(BarChart::new()));
        catalog.register(Box::new(ScatterChart::new()));
        catalog.register(Box::new(PieChart::new()));
        catalog
    }

    /// Largest distinct-category count the selector still routes to pie
    pub fn with_pie_max_categories(mut self, max: usize) -> Self {
        self.pie_max_categories = max;
        self
    }

    /// Register a chart type, replacing any descriptor of the same kind
    pub fn register(&mut self, chart_type: Box<dyn ChartType>) {
        match self
            .types
            .iter()
            .position(|t| t.kind() == chart_type.kind())
        {
            Some(index) => self.types[index] = chart_type,
            None => self.types.push(chart_type),
        }
    }

    pub fn contains(&self, kind: ChartKind) -> bool {
        self.types.iter().any(|t| t.kind() == kind)
    }

    pub fn get_kind(&self, kind: ChartKind) -> Option<&dyn ChartType> {
        self.types
            .iter()
            .find(|t| t.kind() == kind)
            .map(|t| t.as_ref())
    }

    /// Look up a chart type by name
    pub fn get(&self, name: &str) -> Result<&dyn ChartType> {
        ChartKind::from_str(name)
            .ok()
            .and_then(|kind| self.get_kind(kind))
            .ok_or_else(|| ChartError::UnknownChartType {
                requested: name.to_string(),
                available: self.list_types(),
            })
    }

    /// Registered names in registration order
    pub fn list_types(&self) -> Vec<String> {
        self.types.iter().map(|t| t.name().to_string()).collect()
    }

    /// `(name, display_name)` pairs in registration order
    pub fn list_display_names(&self) -> Vec<(String, String)> {
        self.types
            .iter()
            .map(|t| (t.name().to_string(), t.display_name().to_string()))
            .collect()
    }

    /// Kinds whose advisory suitability check accepts the table
    pub fn suitable_types(&self, table: &Table) -> Vec<ChartKind> {
        self.types
            .iter()
            .filter(|t| t.is_suitable_for(table))
            .map(|t| t.kind())
            .collect()
    }

    /// `kind` if registered, else bar, else the first registered type
    fn resolve(&self, kind: ChartKind) -> Option<ChartKind> {
        if self.contains(kind) {
            Some(kind)
        } else if self.contains(ChartKind::Bar) {
            Some(ChartKind::Bar)
        } else {
            self.types.first().map(|t| t.kind())
        }
    }

    /// Pick a chart type from the table's shape
    ///
    /// Rules, first match wins:
    /// 1. first column is date-like: line
    /// 2. only numeric columns, at least two: scatter for exactly two, else line
    /// 3. text columns and one numeric: pie when the first text column has few
    ///    distinct values, else bar
    /// 4. text columns and several numerics: bar
    /// 5. a single numeric column: bar
    /// 6. otherwise: bar
    pub fn infer_best_type(&self, table: &Table) -> Result<ChartKind> {
        let infer_span = span!(
            Level::DEBUG,
            "infer_best_type",
            rows = table.row_count(),
            columns = table.column_count()
        );
        let _enter = infer_span.enter();

        let numeric = table.numeric_columns();
        let categorical = table.categorical_columns();
        let (n_num, n_cat) = (numeric.len(), categorical.len());
        trace!(n_num, n_cat, "Table shape");

        let target = if table.first_column().is_date_like() {
            trace!("First column is date-like");
            ChartKind::Line
        } else if n_cat == 0 && n_num >= 2 {
            if n_num == 2 {
                ChartKind::Scatter
            } else {
                ChartKind::Line
            }
        } else if n_cat >= 1 && n_num == 1 {
            let distinct = table
                .column(categorical[0])
                .map(|c| c.distinct_count())
                .unwrap_or(usize::MAX);
            trace!(distinct, threshold = self.pie_max_categories, "Category count");
            if distinct <= self.pie_max_categories {
                ChartKind::Pie
            } else {
                ChartKind::Bar
            }
        } else {
            ChartKind::Bar
        };

        let chosen = self
            .resolve(target)
            .ok_or_else(|| ChartError::internal("no chart types registered"))?;
        debug!(rule_target = %target, chosen = %chosen, "Selected chart type");
        Ok(chosen)
    }
}

impl Default for ChartTypeCatalog {
    fn default() -> Self {
        Self::with_default_types()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::parsers::TextParser;

    fn table(text: &str) -> Table {
        TextParser::new().parse_text(text).unwrap()
    }

    fn categories(count: usize) -> Table {
        let rows: String = (0..count).map(|i| format!("\ncat{},{}", i, i)).collect();
        table(&format!("Name,Value{}", rows))
    }

    #[test]
    fn test_listing() {
        let catalog = ChartTypeCatalog::with_default_types();
        assert_eq!(catalog.list_types(), vec!["line", "bar", "scatter", "pie"]);
        assert_eq!(
            catalog.list_display_names()[3],
            ("pie".to_string(), "Pie Chart".to_string())
        );
    }

    #[test]
    fn test_get_unknown() {
        let catalog = ChartTypeCatalog::with_default_types();
        assert!(catalog.get("scatter").is_ok());
        match catalog.get("histogram") {
            Err(ChartError::UnknownChartType {
                requested,
                available,
            }) => {
                assert_eq!(requested, "histogram");
                assert_eq!(available.len(), 4);
            }
            _ => panic!("expected UnknownChartType"),
        }
    }

    #[test]
    fn test_rule_cascade() {
        let catalog = ChartTypeCatalog::with_default_types();
        let cases = [
            ("Date,Value\n2025-01-01,100\n2025-01-02,150", ChartKind::Line),
            ("X,Y\n1,10\n2,20", ChartKind::Scatter),
            ("a,b,c\n1,2,3\n4,5,6", ChartKind::Line),
            ("Region,Q1,Q2\nN,1,2\nS,3,4", ChartKind::Bar),
            ("Label,Note\nx,y", ChartKind::Bar),
        ];
        for (text, expected) in cases {
            assert_eq!(
                catalog.infer_best_type(&table(text)).unwrap(),
                expected,
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_month_names_route_to_line() {
        let catalog = ChartTypeCatalog::with_default_types();
        for text in [
            "Month,Sales\nJan,10\nFeb,20\nMar,30",
            "Month,Sales\nJanuary,10\nFebruary,20",
            "Period,Sales\nJan 2024,10\nFeb 2024,20",
        ] {
            assert_eq!(
                catalog.infer_best_type(&table(text)).unwrap(),
                ChartKind::Line,
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_pie_boundary() {
        let catalog = ChartTypeCatalog::with_default_types();
        assert_eq!(catalog.infer_best_type(&categories(8)).unwrap(), ChartKind::Pie);
        assert_eq!(catalog.infer_best_type(&categories(9)).unwrap(), ChartKind::Bar);
    }

    #[test]
    fn test_pie_threshold_configurable() {
        let catalog = ChartTypeCatalog::with_default_types().with_pie_max_categories(3);
        assert_eq!(catalog.infer_best_type(&categories(4)).unwrap(), ChartKind::Bar);
    }

    #[test]
    fn test_degrades_when_target_missing() {
        let mut catalog = ChartTypeCatalog::new();
        catalog.register(Box::new(BarChart::new()));
        catalog.register(Box::new(PieChart::new()));
        let dated = table("Date,Value\n2025-01-01,100");
        assert_eq!(catalog.infer_best_type(&dated).unwrap(), ChartKind::Bar);

        let mut only_pie = ChartTypeCatalog::new();
        only_pie.register(Box::new(PieChart::new()));
        assert_eq!(only_pie.infer_best_type(&dated).unwrap(), ChartKind::Pie);
    }

    #[test]
    fn test_missing_scatter_degrades_to_bar_not_next_rule() {
        let mut catalog = ChartTypeCatalog::new();
        catalog.register(Box::new(LineChart::new()));
        catalog.register(Box::new(BarChart::new()));
        let paired = table("X,Y\n1,10\n2,20");
        assert_eq!(catalog.infer_best_type(&paired).unwrap(), ChartKind::Bar);
    }

    #[test]
    fn test_empty_catalog_is_internal_error() {
        let result = ChartTypeCatalog::new().infer_best_type(&categories(2));
        assert!(matches!(result, Err(ChartError::Internal { .. })));
    }

    #[test]
    fn test_suitable_types() {
        let catalog = ChartTypeCatalog::with_default_types();
        assert_eq!(
            catalog.suitable_types(&categories(3)),
            vec![ChartKind::Line, ChartKind::Bar, ChartKind::Pie]
        );
    }
}
