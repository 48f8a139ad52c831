//! External provider boundaries
//!
//! Suggestion, vision and OCR providers are optional collaborators living
//! outside the crate. Callers check [`is_available`](SuggestionProvider::is_available)
//! first, and the call itself returns a `Result` so a provider that claims
//! availability but fails still degrades to the deterministic path. Errors
//! are opaque (`anyhow`) because they are only ever logged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::ChartConfig;
use super::table::{Table, TablePreview};

/// Proposes a chart config for a table
pub trait SuggestionProvider: Send + Sync {
    fn is_available(&self) -> bool;

    /// Suggest a config; the result is untrusted and validated by the caller
    fn suggest(
        &self,
        table: &Table,
        preview: &TablePreview,
        available_types: &[String],
    ) -> anyhow::Result<Option<ChartConfig>>;
}

/// Table recovered from an image by a vision model
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Reads a table straight out of an image
pub trait VisionExtractor: Send + Sync {
    fn is_available(&self) -> bool;

    fn extract(&self, image: &[u8], mime_type: &str) -> anyhow::Result<Option<ExtractedTable>>;
}

/// Recognizes raw text in an image
pub trait OcrEngine: Send + Sync {
    fn is_available(&self) -> bool;

    fn extract_text(&self, image: &[u8]) -> anyhow::Result<String>;
}

/// Stand-in for any provider that is not configured
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl SuggestionProvider for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn suggest(
        &self,
        _table: &Table,
        _preview: &TablePreview,
        _available_types: &[String],
    ) -> anyhow::Result<Option<ChartConfig>> {
        Ok(None)
    }
}

impl VisionExtractor for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn extract(&self, _image: &[u8], _mime_type: &str) -> anyhow::Result<Option<ExtractedTable>> {
        Ok(None)
    }
}

impl OcrEngine for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn extract_text(&self, _image: &[u8]) -> anyhow::Result<String> {
        Ok(String::new())
    }
}
