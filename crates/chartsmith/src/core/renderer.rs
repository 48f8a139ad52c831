//! Chart renderer trait

use super::config::ChartConfig;
use super::error::Result;
use super::figure::Figure;
use super::table::Table;
use super::types::ChartKind;

/// Builds the base figure for one chart type
///
/// Renderers resolve unset bindings themselves so they can be used without
/// going through the catalog.
pub trait ChartRenderer: Send + Sync {
    fn kind(&self) -> ChartKind;

    fn render(&self, table: &Table, config: &ChartConfig) -> Result<Figure>;
}
