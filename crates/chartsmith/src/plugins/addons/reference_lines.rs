//! Reference line addon

use serde_json::Value;
use tracing::{debug, trace};

use crate::core::{
    ChartConfig, Figure, FigureAddon, LayoutAnnotation, LineStyle, Orientation, ReferenceLine,
    Shape,
};

/// Draws full-span horizontal or vertical guide lines
///
/// Horizontal lines span the x paper domain at `y = value`; vertical lines
/// span the y paper domain at `x = value`. Lines without a value are
/// skipped. A non-empty label is placed at the line's far end.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceLinesAddon;

impl ReferenceLinesAddon {
    pub fn new() -> Self {
        Self
    }

    fn shape(line: &ReferenceLine, value: f64) -> Shape {
        let style = LineStyle {
            color: Some(line.color.clone()),
            width: Some(line.width),
            dash: Some(line.dash.clone()),
        };
        match line.orientation {
            Orientation::Horizontal => Shape {
                shape_type: "line".to_string(),
                xref: "paper".to_string(),
                yref: "y".to_string(),
                x0: 0.0,
                x1: 1.0,
                y0: value,
                y1: value,
                line: style,
            },
            Orientation::Vertical => Shape {
                shape_type: "line".to_string(),
                xref: "x".to_string(),
                yref: "paper".to_string(),
                x0: value,
                x1: value,
                y0: 0.0,
                y1: 1.0,
                line: style,
            },
        }
    }

    fn label(line: &ReferenceLine, value: f64) -> LayoutAnnotation {
        let (x, y, xref, yref, xanchor, yanchor) = match line.orientation {
            Orientation::Horizontal => (
                Value::from(1.0),
                Value::from(value),
                "paper",
                "y",
                "right",
                "bottom",
            ),
            Orientation::Vertical => (
                Value::from(value),
                Value::from(1.0),
                "x",
                "paper",
                "left",
                "top",
            ),
        };
        LayoutAnnotation {
            x,
            y,
            xref: Some(xref.to_string()),
            yref: Some(yref.to_string()),
            text: line.label.clone(),
            showarrow: false,
            arrowhead: None,
            xanchor: Some(xanchor.to_string()),
            yanchor: Some(yanchor.to_string()),
            font: None,
        }
    }
}

impl FigureAddon for ReferenceLinesAddon {
    fn name(&self) -> &'static str {
        "reference_lines"
    }

    fn order(&self) -> i32 {
        20
    }

    fn apply(&self, mut figure: Figure, config: &ChartConfig) -> Figure {
        let Some(lines) = config.reference_lines.as_ref() else {
            return figure;
        };

        let layout = figure.layout_mut();
        for line in lines {
            let Some(value) = line.value else {
                trace!("Skipping reference line without a value");
                continue;
            };
            layout.shapes.push(Self::shape(line, value));
            if !line.label.is_empty() {
                layout.annotations.push(Self::label(line, value));
            }
        }

        debug!(shapes = layout.shapes.len(), "Applied reference lines");
        figure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChartKind;

    #[test]
    fn test_unset_is_noop() {
        let figure = Figure::new();
        assert_eq!(
            ReferenceLinesAddon::new().apply(figure.clone(), &ChartConfig::default()),
            figure
        );
    }

    #[test]
    fn test_horizontal_and_vertical() {
        let config = ChartConfig::new(ChartKind::Line)
            .with_reference_line(ReferenceLine::horizontal(100.0).with_label("Target"))
            .with_reference_line(ReferenceLine::vertical(3.0));
        let figure = ReferenceLinesAddon::new().apply(Figure::new(), &config);

        let shapes = &figure.layout().shapes;
        assert_eq!(shapes.len(), 2);
        assert_eq!((shapes[0].xref.as_str(), shapes[0].x0, shapes[0].x1), ("paper", 0.0, 1.0));
        assert_eq!((shapes[0].y0, shapes[0].y1), (100.0, 100.0));
        assert_eq!(shapes[0].line.color.as_deref(), Some("red"));
        assert_eq!(shapes[0].line.dash.as_deref(), Some("dash"));
        assert_eq!(shapes[0].line.width, Some(2.0));
        assert_eq!((shapes[1].yref.as_str(), shapes[1].x0), ("paper", 3.0));

        assert_eq!(figure.layout().annotations.len(), 1);
        assert_eq!(figure.layout().annotations[0].text, "Target");
    }

    #[test]
    fn test_lines_without_value_skipped() {
        let config = ChartConfig::new(ChartKind::Bar).with_reference_line(ReferenceLine::default());
        let figure = ReferenceLinesAddon::new().apply(Figure::new(), &config);
        assert!(figure.layout().shapes.is_empty());
    }
}
