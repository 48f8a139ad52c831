//! Color palette addon

use tracing::trace;

use crate::core::{ChartConfig, Figure, FigureAddon, LineStyle, Marker, TraceType};

/// Keep the renderer's own colors
const DEFAULT: &[&str] = &[];
const VIBRANT: &[&str] = &[
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6",
];
const PASTEL: &[&str] = &[
    "#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6", "#ffffcc", "#e5d8bd", "#fddaec",
];
const EARTH: &[&str] = &["#8c510a", "#d8b365", "#f6e8c3", "#c7eae5", "#5ab4ac", "#01665e"];
const OCEAN: &[&str] = &[
    "#023e8a", "#0077b6", "#0096c7", "#00b4d8", "#48cae4", "#90e0ef", "#ade8f4",
];
const SUNSET: &[&str] = &[
    "#ff6b6b", "#ffa06b", "#ffd93d", "#6bff6b", "#6bd9ff", "#6b6bff", "#ff6bff",
];

pub const PRESET_NAMES: &[&str] = &["default", "vibrant", "pastel", "earth", "ocean", "sunset"];

/// Colors of a named preset; `default` is a preset with no colors
pub fn preset_colors(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "default" => Some(DEFAULT),
        "vibrant" => Some(VIBRANT),
        "pastel" => Some(PASTEL),
        "earth" => Some(EARTH),
        "ocean" => Some(OCEAN),
        "sunset" => Some(SUNSET),
        _ => None,
    }
}

/// Recolors traces from `color_palette`
///
/// Series trace *i* takes color *i*; pie traces take the whole list, one
/// color per sector.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorPaletteAddon;

impl ColorPaletteAddon {
    pub fn new() -> Self {
        Self
    }

    fn resolve(palette: &[String]) -> Vec<String> {
        if let [name] = palette {
            if let Some(preset) = preset_colors(name) {
                return preset.iter().map(|c| c.to_string()).collect();
            }
        }
        palette.to_vec()
    }
}

impl FigureAddon for ColorPaletteAddon {
    fn name(&self) -> &'static str {
        "color_palette"
    }

    fn order(&self) -> i32 {
        10
    }

    fn apply(&self, mut figure: Figure, config: &ChartConfig) -> Figure {
        let colors = match config.color_palette.as_deref() {
            Some(palette) if !palette.is_empty() => Self::resolve(palette),
            _ => return figure,
        };
        if colors.is_empty() {
            return figure;
        }
        trace!(colors = colors.len(), "Applying palette");

        for (index, trace) in figure.traces_mut().iter_mut().enumerate() {
            if trace.is_pie() {
                trace.marker.get_or_insert_with(Marker::default).colors = Some(colors.clone());
                continue;
            }
            let Some(color) = colors.get(index) else {
                continue;
            };
            trace.marker.get_or_insert_with(Marker::default).color = Some(color.clone());
            if trace.trace_type == Some(TraceType::Scatter) {
                trace.line.get_or_insert_with(LineStyle::default).color = Some(color.clone());
            }
        }

        figure
    }
}
