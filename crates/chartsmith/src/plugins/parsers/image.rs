//! Image table parser
//!
//! Extraction runs in strict order: vision model, then OCR followed by a
//! delimited-text re-parse. Provider failures are logged and never fatal on
//! their own; only when both strategies come up empty does parsing fail with
//! [`ChartError::ExtractionFailed`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, span, warn, Level};

use super::text::TextParser;
use crate::core::{
    file_extension, ChartError, ExtractedTable, OcrEngine, RawInput, Result, SourceKind, Table,
    TableParser, Unavailable, VisionExtractor,
};

const PNG_MAGIC: &[u8] = b"\x89PNG";
const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff";

/// True if the bytes start with a PNG, JPEG or WEBP signature
pub fn is_image_bytes(data: &[u8]) -> bool {
    data.starts_with(PNG_MAGIC)
        || data.starts_with(JPEG_MAGIC)
        || (data.starts_with(b"RIFF") && data.get(8..12) == Some(b"WEBP".as_slice()))
}

/// MIME type for the vision provider: extension, then magic bytes, then PNG
pub fn guess_mime_type(data: &[u8], filename: Option<&str>) -> &'static str {
    match file_extension(filename).as_deref() {
        Some("png") => return "image/png",
        Some("jpg") | Some("jpeg") => return "image/jpeg",
        Some("webp") => return "image/webp",
        _ => {}
    }

    if data.starts_with(PNG_MAGIC) {
        "image/png"
    } else if data.starts_with(JPEG_MAGIC) {
        "image/jpeg"
    } else if data.starts_with(b"RIFF") {
        "image/webp"
    } else {
        "image/png"
    }
}

/// Parser for photographed or screenshotted tables
#[derive(Clone)]
pub struct ImageParser {
    vision: Arc<dyn VisionExtractor>,
    ocr: Arc<dyn OcrEngine>,
    text: TextParser,
}

impl ImageParser {
    /// Parser with no extraction providers configured
    pub fn new() -> Self {
        Self::with_providers(Arc::new(Unavailable), Arc::new(Unavailable))
    }

    pub fn with_providers(vision: Arc<dyn VisionExtractor>, ocr: Arc<dyn OcrEngine>) -> Self {
        Self {
            vision,
            ocr,
            text: TextParser::new(),
        }
    }

    /// Vision strategy: a table, or the provider's error for diagnostics
    fn try_vision(&self, image: &[u8], mime_type: &str) -> (Option<Table>, Option<String>) {
        if !self.vision.is_available() {
            debug!("Vision extraction skipped, provider unavailable");
            return (None, None);
        }

        match self.vision.extract(image, mime_type) {
            Ok(Some(extracted)) => match table_from_extracted(extracted) {
                Ok(table) => {
                    info!(rows = table.row_count(), "Vision provider extracted table");
                    (Some(table), None)
                }
                Err(e) => {
                    debug!(error = %e, "Vision result had no usable table");
                    (None, None)
                }
            },
            Ok(None) => {
                debug!("Vision provider returned no table");
                (None, None)
            }
            Err(e) => {
                warn!(error = %e, "Vision extraction failed");
                (None, Some(format!("{:#}", e)))
            }
        }
    }

    fn try_ocr(&self, image: &[u8]) -> Option<Table> {
        if !self.ocr.is_available() {
            debug!("OCR skipped, engine unavailable");
            return None;
        }

        let text = match self.ocr.extract_text(image) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "OCR extraction failed");
                return None;
            }
        };
        if text.trim().is_empty() {
            debug!("OCR produced no text");
            return None;
        }

        match self.text.parse_text(&text) {
            Ok(table) => {
                info!(rows = table.row_count(), "OCR text parsed as table");
                Some(table)
            }
            Err(e) => {
                debug!(error = %e, "OCR text is not tabular");
                None
            }
        }
    }
}

impl Default for ImageParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ImageParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageParser")
            .field("vision_available", &self.vision.is_available())
            .field("ocr_available", &self.ocr.is_available())
            .finish()
    }
}

/// Build a table from a vision result, padding or truncating ragged rows
fn table_from_extracted(extracted: ExtractedTable) -> Result<Table> {
    let width = extracted.columns.len();
    if width == 0 {
        return Err(ChartError::empty_table("extracted table has no columns"));
    }

    let rows = extracted
        .rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            if row.len() != width {
                warn!(
                    row = index,
                    expected = width,
                    actual = row.len(),
                    "Extracted row length does not match header"
                );
            }
            let mut cells: Vec<String> = row.iter().take(width).map(value_text).collect();
            cells.resize(width, String::new());
            cells
        })
        .collect();

    Table::from_records(extracted.columns, rows)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl TableParser for ImageParser {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Image
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["png", "jpg", "jpeg", "webp"]
    }

    fn can_handle(&self, input: &RawInput, filename: Option<&str>) -> bool {
        if filename.is_some() {
            return self.claims_extension(filename);
        }
        match input.as_bytes() {
            Some(bytes) if bytes.len() > 8 => is_image_bytes(bytes),
            _ => false,
        }
    }

    fn parse(&self, input: &RawInput, filename: Option<&str>) -> Result<Table> {
        let bytes = input.as_bytes().ok_or(ChartError::InvalidInputKind {
            parser: "image",
            expected: "bytes",
        })?;

        let mime_type = guess_mime_type(bytes, filename);
        let parse_span = span!(
            Level::INFO,
            "parse_image",
            filename,
            mime_type,
            image_size = bytes.len()
        );
        let _enter = parse_span.enter();

        let (table, vision_error) = self.try_vision(bytes, mime_type);
        if let Some(table) = table {
            return Ok(table);
        }

        if let Some(table) = self.try_ocr(bytes) {
            return Ok(table);
        }

        warn!(vision_error = ?vision_error, "Image extraction exhausted all strategies");
        Err(ChartError::ExtractionFailed {
            last_error: vision_error,
        })
    }
}
