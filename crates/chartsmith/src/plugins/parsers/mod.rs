//! Input format parsers and the dispatcher that picks one
//!
//! Parsers are probed in a fixed priority order: spreadsheet, CSV, image,
//! then delimited text as the catch-all. The first parser whose capability
//! probe accepts the input wins.

mod csv;
mod delimited;
mod image;
mod spreadsheet;
mod text;

pub use self::csv::CsvParser;
pub use self::image::{guess_mime_type, is_image_bytes, ImageParser};
pub use self::spreadsheet::SpreadsheetParser;
pub use self::text::TextParser;

use std::sync::Arc;
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{
    ChartError, OcrEngine, ParsedTable, RawInput, Result, TableParser, VisionExtractor,
};

/// Ordered set of parsers, read-only once built
pub struct ParserRegistry {
    parsers: Vec<Box<dyn TableParser>>,
}

impl ParserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Registry with every built-in parser and no image providers
    pub fn with_default_parsers() -> Self {
        Self::with_image_providers(
            Arc::new(crate::core::Unavailable),
            Arc::new(crate::core::Unavailable),
        )
    }

    /// Registry with every built-in parser, extracting images through the given providers
    pub fn with_image_providers(
        vision: Arc<dyn VisionExtractor>,
        ocr: Arc<dyn OcrEngine>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SpreadsheetParser::new()));
        registry.register(Box::new(CsvParser::new()));
        registry.register(Box::new(ImageParser::with_providers(vision, ocr)));
        registry.register(Box::new(TextParser::new()));
        registry
    }

    /// Register a parser
    ///
    /// A parser whose name is already registered replaces the old one in its
    /// priority slot; new names go last.
    pub fn register(&mut self, parser: Box<dyn TableParser>) {
        match self.parsers.iter().position(|p| p.name() == parser.name()) {
            Some(index) => self.parsers[index] = parser,
            None => self.parsers.push(parser),
        }
    }

    /// Registered parser names in priority order
    pub fn list_parsers(&self) -> Vec<String> {
        self.parsers.iter().map(|p| p.name().to_string()).collect()
    }

    /// First parser, in priority order, that accepts the input
    pub fn get_parser_for(
        &self,
        input: &RawInput,
        filename: Option<&str>,
    ) -> Result<&dyn TableParser> {
        let dispatch_span = span!(
            Level::DEBUG,
            "dispatch_parser",
            filename,
            input_kind = input.kind(),
            input_len = input.len()
        );
        let _enter = dispatch_span.enter();

        for parser in &self.parsers {
            let accepted = parser.can_handle(input, filename);
            trace!(parser = parser.name(), accepted, "Probed parser");
            if accepted {
                debug!(parser = parser.name(), "Parser selected");
                return Ok(parser.as_ref());
            }
        }

        warn!("No parser accepted the input");
        Err(ChartError::NoParserFound {
            filename: filename.map(str::to_string),
            input_kind: input.kind(),
            length: input.len(),
            available: self.list_parsers(),
        })
    }

    /// Dispatch and parse in one step
    pub fn parse(&self, input: &RawInput, filename: Option<&str>) -> Result<ParsedTable> {
        let parser = self.get_parser_for(input, filename)?;
        let table = parser.parse(input, filename)?;
        info!(
            parser = parser.name(),
            rows = table.row_count(),
            columns = table.column_count(),
            "Parsed input"
        );
        Ok(ParsedTable::new(table, parser.source_kind()))
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_default_parsers()
    }
}
