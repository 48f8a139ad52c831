//! Declarative figure description
//!
//! A [`Figure`] is a backend-neutral scene graph: a list of traces plus a
//! layout. Field names follow the plotly.js figure schema so the JSON form
//! can be handed straight to a plotly front end.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ChartError, Result};
use super::types::CellValue;

/// Drawing primitive of a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceType {
    Bar,
    Scatter,
    Pie,
}

/// One data series
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub trace_type: Option<TraceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<CellValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<CellValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<CellValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<CellValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

impl Trace {
    pub fn new(trace_type: TraceType) -> Self {
        Self {
            trace_type: Some(trace_type),
            ..Self::default()
        }
    }

    pub fn is_pie(&self) -> bool {
        self.trace_type == Some(TraceType::Pie)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Per-sector colors for pie traces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HoverLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

/// Layout-level drawing such as a reference line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub shape_type: String,
    pub xref: String,
    pub yref: String,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub line: LineStyle,
}

/// Text placed on the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutAnnotation {
    pub x: Value,
    pub y: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    pub text: String,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrowhead: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<LayoutAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverlabel: Option<HoverLabel>,
}

impl Layout {
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().map(|t| t.text.as_str())
    }

    pub fn set_axis_titles(&mut self, x: impl Into<String>, y: impl Into<String>) {
        self.xaxis = Some(Axis {
            title: Some(Title::new(x)),
        });
        self.yaxis = Some(Axis {
            title: Some(Title::new(y)),
        });
    }
}

/// Traces plus layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_trace(&mut self, trace: Trace) {
        self.data.push(trace);
    }

    pub fn traces(&self) -> &[Trace] {
        &self.data
    }

    pub fn traces_mut(&mut self) -> &mut [Trace] {
        &mut self.data
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// Compact interactive scene description
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ChartError::internal(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ChartError::internal(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ChartError::parse_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_serializes_plotly_names() {
        let mut trace = Trace::new(TraceType::Scatter);
        trace.mode = Some("lines".to_string());
        trace.x = Some(vec![CellValue::Integer(1)]);
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "scatter");
        assert_eq!(json["mode"], "lines");
        assert!(json.get("labels").is_none());
    }

    #[test]
    fn test_empty_layout_lists_omitted() {
        let json = Figure::new().to_json().unwrap();
        assert_eq!(json, r#"{"data":[],"layout":{}}"#);
    }

    #[test]
    fn test_json_round_trip() {
        let mut figure = Figure::new();
        let mut trace = Trace::new(TraceType::Pie);
        trace.labels = Some(vec![CellValue::Text("A".to_string())]);
        trace.values = Some(vec![CellValue::Integer(3)]);
        figure.add_trace(trace);
        figure.layout.title = Some(Title::new("Share"));

        let restored = Figure::from_json(&figure.to_json_pretty().unwrap()).unwrap();
        assert_eq!(restored, figure);
        assert_eq!(restored.layout().title_text(), Some("Share"));
    }
}
