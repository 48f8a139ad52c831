//! Figure addon trait

use super::config::ChartConfig;
use super::figure::Figure;

/// A post-processing step applied to every rendered figure
///
/// Addons run in ascending [`FigureAddon::order`]. Each is a pure transform
/// and must leave the figure untouched when its part of the config is unset.
pub trait FigureAddon: Send + Sync {
    fn name(&self) -> &'static str;

    fn order(&self) -> i32;

    fn apply(&self, figure: Figure, config: &ChartConfig) -> Figure;
}
