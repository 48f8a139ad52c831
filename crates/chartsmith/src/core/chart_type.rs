//! Chart type descriptor trait

use super::config::ChartConfig;
use super::table::Table;
use super::types::ChartKind;

/// Describes one chart type: its name, when it fits, and how to bind axes
///
/// Suitability is advisory. Automatic selection uses the catalog's rule
/// cascade instead.
pub trait ChartType: Send + Sync {
    fn kind(&self) -> ChartKind;

    fn display_name(&self) -> &'static str;

    /// Whether the chart type can sensibly show this table
    fn is_suitable_for(&self, table: &Table) -> bool;

    /// Derive axis bindings, title and labels from the table's shape
    fn default_config(&self, table: &Table) -> ChartConfig;

    fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}
