//! Core type definitions for chart creation
//!
//! This module contains the small value types shared by every stage of the
//! pipeline: raw input, the parser that produced a table, the chart kinds,
//! and the scalar cell values that end up in figure data arrays.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Raw input handed to the pipeline
///
/// Pasted text arrives as [`RawInput::Text`]; uploaded files arrive as
/// [`RawInput::Bytes`] together with their filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Text(String),
    Bytes(Vec<u8>),
}

impl RawInput {
    /// Diagnostic name of the input representation
    pub fn kind(&self) -> &'static str {
        match self {
            RawInput::Text(_) => "text",
            RawInput::Bytes(_) => "bytes",
        }
    }

    /// Length in chars for text, bytes for binary input
    pub fn len(&self) -> usize {
        match self {
            RawInput::Text(text) => text.chars().count(),
            RawInput::Bytes(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawInput::Text(text) => text.is_empty(),
            RawInput::Bytes(bytes) => bytes.is_empty(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, RawInput::Text(_))
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RawInput::Bytes(bytes) => Some(bytes),
            RawInput::Text(_) => None,
        }
    }
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        RawInput::Text(text.to_string())
    }
}

impl From<String> for RawInput {
    fn from(text: String) -> Self {
        RawInput::Text(text)
    }
}

impl From<Vec<u8>> for RawInput {
    fn from(bytes: Vec<u8>) -> Self {
        RawInput::Bytes(bytes)
    }
}

impl From<&[u8]> for RawInput {
    fn from(bytes: &[u8]) -> Self {
        RawInput::Bytes(bytes.to_vec())
    }
}

/// Lowercased filename extension without the leading dot
pub fn file_extension(filename: Option<&str>) -> Option<String> {
    let filename = filename?;
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Which parser produced a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Pasted delimited text
    Text,
    /// CSV file
    Csv,
    /// Spreadsheet workbook (first sheet)
    Spreadsheet,
    /// Photographed or screenshotted table
    Image,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Text => "text",
            SourceKind::Csv => "csv",
            SourceKind::Spreadsheet => "spreadsheet",
            SourceKind::Image => "image",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart kinds known to the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Pie,
}

impl Default for ChartKind {
    fn default() -> Self {
        ChartKind::Bar
    }
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Pie => "pie",
        }
    }

    /// All kinds, in catalog registration order
    pub fn all() -> &'static [ChartKind] {
        &[
            ChartKind::Line,
            ChartKind::Bar,
            ChartKind::Scatter,
            ChartKind::Pie,
        ]
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "scatter" => Ok(ChartKind::Scatter),
            "pie" => Ok(ChartKind::Pie),
            _ => Err(format!("Unknown chart type: {}", s)),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scalar in a figure data array
///
/// Serializes untagged so a trace's `x`/`y` arrays read like plain JSON.
/// Non-finite floats serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(v) => Some(*v as f64),
            CellValue::Float(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
            CellValue::Null => Ok(()),
        }
    }
}
