//! Layout addon, always applied last

use tracing::trace;

use crate::core::{
    ChartConfig, Figure, FigureAddon, Font, HoverLabel, LayoutAnnotation, Margin,
};

pub const FONT_FAMILY: &str = "Inter, Arial, sans-serif";

/// Applies the template, annotations and fixed presentation defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutAddon;

impl LayoutAddon {
    pub fn new() -> Self {
        Self
    }
}

impl FigureAddon for LayoutAddon {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn order(&self) -> i32 {
        100
    }

    fn apply(&self, mut figure: Figure, config: &ChartConfig) -> Figure {
        let layout = figure.layout_mut();

        if !config.template.is_empty() {
            layout.template = Some(config.template.clone());
        }

        if let Some(annotations) = &config.annotations {
            trace!(count = annotations.len(), "Adding annotations");
            layout
                .annotations
                .extend(annotations.iter().map(|a| LayoutAnnotation {
                    x: a.x.clone(),
                    y: a.y.clone(),
                    xref: None,
                    yref: None,
                    text: a.text.clone(),
                    showarrow: a.show_arrow,
                    arrowhead: Some(a.arrowhead),
                    xanchor: None,
                    yanchor: None,
                    font: Some(Font {
                        size: Some(a.font_size),
                        ..Font::default()
                    }),
                }));
        }

        layout.font = Some(Font {
            family: Some(FONT_FAMILY.to_string()),
            ..Font::default()
        });
        layout.hoverlabel = Some(HoverLabel {
            bgcolor: Some("white".to_string()),
            font_size: Some(13),
        });
        layout.margin = Some(Margin {
            l: 60,
            r: 30,
            t: 60,
            b: 60,
        });

        figure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Annotation, ChartKind};

    #[test]
    fn test_defaults_always_applied() {
        let figure = LayoutAddon::new().apply(Figure::new(), &ChartConfig::default());
        let layout = figure.layout();
        assert_eq!(layout.template.as_deref(), Some("plotly_white"));
        assert_eq!(
            layout.font.as_ref().and_then(|f| f.family.as_deref()),
            Some(FONT_FAMILY)
        );
        assert_eq!(layout.margin, Some(Margin { l: 60, r: 30, t: 60, b: 60 }));
        assert_eq!(
            layout.hoverlabel.as_ref().and_then(|h| h.font_size),
            Some(13)
        );
    }

    #[test]
    fn test_annotations_appended() {
        let config = ChartConfig::new(ChartKind::Line)
            .with_annotation(Annotation::new("2025-01-02", 150, "Peak"));
        let figure = LayoutAddon::new().apply(Figure::new(), &config);
        let annotation = &figure.layout().annotations[0];
        assert_eq!(annotation.text, "Peak");
        assert!(annotation.showarrow);
        assert_eq!(annotation.arrowhead, Some(2));
        assert_eq!(annotation.font.as_ref().and_then(|f| f.size), Some(12));
    }
}
