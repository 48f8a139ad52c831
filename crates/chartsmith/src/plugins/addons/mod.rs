//! Figure addons applied after rendering
//!
//! | addon             | order |
//! |-------------------|-------|
//! | `color_palette`   | 10    |
//! | `reference_lines` | 20    |
//! | `layout`          | 100   |

mod layout;
mod palette;
mod reference_lines;

pub use layout::LayoutAddon;
pub use palette::{preset_colors, ColorPaletteAddon, PRESET_NAMES};
pub use reference_lines::ReferenceLinesAddon;

use crate::core::FigureAddon;

/// The built-in addons, in any order
pub fn default_addons() -> Vec<Box<dyn FigureAddon>> {
    vec![
        Box::new(ColorPaletteAddon::new()),
        Box::new(ReferenceLinesAddon::new()),
        Box::new(LayoutAddon::new()),
    ]
}
