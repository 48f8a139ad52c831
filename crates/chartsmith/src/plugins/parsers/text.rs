//! Delimited text parser
//!
//! Catch-all parser for pasted text. The delimiter is detected from the
//! header line: tab, then comma, then runs of whitespace.

use tracing::{debug, span, trace, Level};

use super::delimited::{read_records, read_whitespace_records, Records};
use crate::core::{file_extension, ChartError, RawInput, Result, SourceKind, Table, TableParser};

/// Extensions owned by a more specific parser
const FOREIGN_EXTENSIONS: &[&str] = &[
    "csv", "xlsx", "xls", "xlsm", "xlsb", "ods", "png", "jpg", "jpeg", "webp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Tab,
    Comma,
    Whitespace,
}

/// Parser for tab, comma or space separated text
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParser;

impl TextParser {
    pub fn new() -> Self {
        Self
    }

    fn detect_delimiter(header: &str) -> Option<Delimiter> {
        if header.contains('\t') {
            Some(Delimiter::Tab)
        } else if header.contains(',') {
            Some(Delimiter::Comma)
        } else if header.split_whitespace().nth(1).is_some() {
            Some(Delimiter::Whitespace)
        } else {
            None
        }
    }

    /// Parse already-decoded text
    pub fn parse_text(&self, text: &str) -> Result<Table> {
        let parse_span = span!(Level::DEBUG, "parse_text", input_len = text.len());
        let _enter = parse_span.enter();

        let text = text.trim();
        if text.is_empty() {
            return Err(ChartError::empty_input("Empty text input"));
        }

        let header = text.lines().next().unwrap_or_default();
        let delimiter = Self::detect_delimiter(header).ok_or_else(|| {
            ChartError::parse_error("Failed to parse text input: could not determine delimiter")
        })?;
        trace!(?delimiter, "Detected delimiter");

        let Records { headers, rows } = match delimiter {
            Delimiter::Tab => read_records(text, b'\t', true)?,
            Delimiter::Comma => read_records(text, b',', true)?,
            Delimiter::Whitespace => read_whitespace_records(text),
        };

        if rows.is_empty() {
            return Err(ChartError::empty_table(
                "Parsed text resulted in an empty table",
            ));
        }

        let table = Table::from_records(headers, rows)?;
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "Parsed text table"
        );
        Ok(table)
    }
}

impl TableParser for TextParser {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Text
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["txt", "tsv"]
    }

    fn can_handle(&self, input: &RawInput, filename: Option<&str>) -> bool {
        match file_extension(filename) {
            Some(ext) if self.supported_extensions().contains(&ext.as_str()) => true,
            Some(ext) if FOREIGN_EXTENSIONS.contains(&ext.as_str()) => false,
            _ => input.is_text(),
        }
    }

    fn parse(&self, input: &RawInput, _filename: Option<&str>) -> Result<Table> {
        match input {
            RawInput::Text(text) => self.parse_text(text),
            RawInput::Bytes(bytes) => {
                let text = std::str::from_utf8(bytes).map_err(|e| {
                    ChartError::parse_error(format!("Text input is not valid UTF-8: {}", e))
                })?;
                self.parse_text(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColumnValues;

    #[test]
    fn test_comma_separated() {
        let table = TextParser::new()
            .parse_text("Category,Value\nA,10\nB,20\nC,30")
            .unwrap();
        assert_eq!(table.shape(), (3, 2));
        assert_eq!(table.categorical_columns(), vec!["Category"]);
        assert_eq!(table.numeric_columns(), vec!["Value"]);
    }

    #[test]
    fn test_tab_separated_with_padding() {
        let table = TextParser::new()
            .parse_text("  Name\tScore\nAda\t 91\nBob\t78\n  ")
            .unwrap();
        assert_eq!(table.column_names(), vec!["Name", "Score"]);
        assert_eq!(
            table.column("Score").unwrap().values(),
            &ColumnValues::Integer(vec![91, 78])
        );
    }

    #[test]
    fn test_whitespace_separated() {
        let table = TextParser::new()
            .parse_text("x y z\n1 2 3\n4 5 6")
            .unwrap();
        assert_eq!(table.numeric_columns(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_empty_input() {
        let result = TextParser::new().parse_text("  \n\t ");
        assert!(matches!(result, Err(ChartError::EmptyInput { .. })));
    }

    #[test]
    fn test_no_structure() {
        let result = TextParser::new().parse_text("justoneword\nanother");
        assert!(matches!(result, Err(ChartError::ParseError { .. })));
    }

    #[test]
    fn test_header_only() {
        let result = TextParser::new().parse_text("a,b");
        assert!(matches!(result, Err(ChartError::EmptyTable { .. })));
    }

    #[test]
    fn test_too_many_fields() {
        let result = TextParser::new().parse_text("a,b\n1,2,3");
        assert!(matches!(result, Err(ChartError::ParseError { .. })));
    }

    #[test]
    fn test_invalid_utf8_bytes() {
        let input = RawInput::from(vec![b'a', b',', 0xff, b'\n']);
        let result = TextParser::new().parse(&input, Some("data.txt"));
        assert!(matches!(result, Err(ChartError::ParseError { .. })));
    }

    #[test]
    fn test_can_handle() {
        let parser = TextParser::new();
        let text = RawInput::from("a,b");
        let bytes = RawInput::from(b"a,b".to_vec());

        assert!(parser.can_handle(&text, None));
        assert!(parser.can_handle(&text, Some("notes")));
        assert!(parser.can_handle(&bytes, Some("data.TSV")));
        assert!(!parser.can_handle(&bytes, None));
        assert!(!parser.can_handle(&text, Some("data.csv")));
        assert!(!parser.can_handle(&text, Some("photo.png")));
    }
}
