//! Declarative chart configuration
//!
//! A [`ChartConfig`] is created once per request by a chart type's default
//! deriver (or a validated suggestion), optionally patched with caller
//! overrides, then handed read-only to the render pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{ChartError, Result};
use super::types::ChartKind;

/// Theme applied when nothing else is configured
pub const DEFAULT_TEMPLATE: &str = "plotly_white";

/// Full description of the chart to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub chart_type: ChartKind,
    /// `None` lets the renderer derive the x binding
    pub x_column: Option<String>,
    /// Empty lets the renderer derive the y bindings
    pub y_columns: Vec<String>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Explicit colors, or a single preset name
    pub color_palette: Option<Vec<String>>,
    pub reference_lines: Option<Vec<ReferenceLine>>,
    pub annotations: Option<Vec<Annotation>>,
    pub template: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartKind::default(),
            x_column: None,
            y_columns: Vec::new(),
            title: None,
            x_label: None,
            y_label: None,
            color_palette: None,
            reference_lines: None,
            annotations: None,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl ChartConfig {
    pub fn new(chart_type: ChartKind) -> Self {
        Self {
            chart_type,
            ..Self::default()
        }
    }

    pub fn with_x_column(mut self, column: impl Into<String>) -> Self {
        self.x_column = Some(column.into());
        self
    }

    pub fn with_y_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.y_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.color_palette = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_reference_line(mut self, line: ReferenceLine) -> Self {
        self.reference_lines.get_or_insert_with(Vec::new).push(line);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.get_or_insert_with(Vec::new).push(annotation);
        self
    }

    /// Replace title and bindings with any caller-supplied values
    pub fn apply_overrides(
        &mut self,
        title: Option<&str>,
        x_column: Option<&str>,
        y_columns: Option<&[String]>,
    ) {
        if let Some(title) = title {
            self.title = Some(title.to_string());
        }
        if let Some(x) = x_column {
            self.x_column = Some(x.to_string());
        }
        if let Some(ys) = y_columns {
            self.y_columns = ys.to_vec();
        }
    }

    /// Every column name the config refers to
    pub fn referenced_columns(&self) -> impl Iterator<Item = &str> {
        self.x_column
            .as_deref()
            .into_iter()
            .chain(self.y_columns.iter().map(String::as_str))
    }

    /// Serialize to a plain key-value map
    pub fn to_dict(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Rebuild from a key-value map; unknown keys are ignored
    pub fn from_dict(map: &Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(map.clone()))
            .map_err(|e| ChartError::invalid_config(e.to_string()))
    }
}

/// Direction of a reference line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(rename = "h", alias = "horizontal")]
    Horizontal,
    #[serde(rename = "v", alias = "vertical")]
    Vertical,
}

/// A straight guide line drawn across the plot area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceLine {
    pub orientation: Orientation,
    /// Lines without a value are skipped
    pub value: Option<f64>,
    pub color: String,
    pub dash: String,
    pub label: String,
    pub width: f64,
}

impl Default for ReferenceLine {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            value: None,
            color: "red".to_string(),
            dash: "dash".to_string(),
            label: String::new(),
            width: 2.0,
        }
    }
}

impl ReferenceLine {
    pub fn horizontal(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn vertical(value: f64) -> Self {
        Self {
            orientation: Orientation::Vertical,
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A positioned text callout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    pub x: Value,
    pub y: Value,
    pub text: String,
    #[serde(alias = "showarrow")]
    pub show_arrow: bool,
    pub arrowhead: u8,
    pub font_size: u32,
}

impl Default for Annotation {
    fn default() -> Self {
        Self {
            x: Value::Null,
            y: Value::Null,
            text: String::new(),
            show_arrow: true,
            arrowhead: 2,
            font_size: 12,
        }
    }
}

impl Annotation {
    pub fn new(x: impl Into<Value>, y: impl Into<Value>, text: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            text: text.into(),
            ..Self::default()
        }
    }
}
