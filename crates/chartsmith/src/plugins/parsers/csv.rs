//! CSV file parser
//!
//! Bytes are decoded as UTF-8, falling back to Windows-1252 (the web's
//! Latin-1) which accepts every byte sequence.

use std::borrow::Cow;
use tracing::{debug, span, warn, Level};

use super::delimited::read_records;
use crate::core::{ChartError, RawInput, Result, SourceKind, Table, TableParser};

/// Parser for `.csv` uploads
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        Self
    }

    fn decode(bytes: &[u8]) -> Cow<'_, str> {
        match std::str::from_utf8(bytes) {
            Ok(text) => Cow::Borrowed(text),
            Err(e) => {
                warn!(error = %e, "CSV is not valid UTF-8, decoding as Latin-1");
                let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
                text
            }
        }
    }

    fn parse_str(&self, text: &str) -> Result<Table> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        if text.trim().is_empty() {
            return Err(ChartError::empty_input("CSV input has no columns to parse"));
        }

        let records = read_records(text, b',', false)?;
        if records.rows.is_empty() {
            return Err(ChartError::empty_table(
                "CSV file resulted in an empty table",
            ));
        }

        Table::from_records(records.headers, records.rows)
    }
}

impl TableParser for CsvParser {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Csv
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }

    fn can_handle(&self, _input: &RawInput, filename: Option<&str>) -> bool {
        self.claims_extension(filename)
    }

    fn parse(&self, input: &RawInput, filename: Option<&str>) -> Result<Table> {
        let parse_span = span!(Level::DEBUG, "parse_csv", filename, input_len = input.len());
        let _enter = parse_span.enter();

        let table = match input {
            RawInput::Text(text) => self.parse_str(text)?,
            RawInput::Bytes(bytes) => self.parse_str(&Self::decode(bytes))?,
        };

        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "Parsed CSV table"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColumnValues;

    fn parse_bytes(bytes: &[u8]) -> Result<Table> {
        CsvParser::new().parse(&RawInput::from(bytes), Some("data.csv"))
    }

    #[test]
    fn test_parse_bytes() {
        let table = parse_bytes(b"Region,Sales,Growth\nNorth,100,0.5\nSouth,80,\n").unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.numeric_columns(), vec!["Sales", "Growth"]);
    }

    #[test]
    fn test_string_input_is_literal_csv() {
        let table = CsvParser::new()
            .parse(&RawInput::from("a,b\n1,x"), Some("upload.csv"))
            .unwrap();
        assert_eq!(table.numeric_columns(), vec!["a"]);
    }

    #[test]
    fn test_latin1_fallback() {
        let table = parse_bytes(b"City,Count\nM\xfcnchen,3\n").unwrap();
        match table.column("City").unwrap().values() {
            ColumnValues::Text(values) => assert_eq!(values[0], "München"),
            other => panic!("unexpected column {:?}", other),
        }
    }

    #[test]
    fn test_bom_stripped() {
        let table = parse_bytes(b"\xef\xbb\xbfid,v\n1,2\n").unwrap();
        assert_eq!(table.column_names(), vec!["id", "v"]);
    }

    #[test]
    fn test_empty_bytes_rejected() {
        assert!(matches!(parse_bytes(b""), Err(ChartError::EmptyInput { .. })));
    }

    #[test]
    fn test_header_only_rejected() {
        assert!(matches!(
            parse_bytes(b"a,b,c\n"),
            Err(ChartError::EmptyTable { .. })
        ));
    }

    #[test]
    fn test_long_row_rejected() {
        assert!(matches!(
            parse_bytes(b"a,b\n1,2,3\n"),
            Err(ChartError::ParseError { .. })
        ));
    }

    #[test]
    fn test_claims_extension_only() {
        let parser = CsvParser::new();
        let input = RawInput::from(b"a,b".to_vec());
        assert!(parser.can_handle(&input, Some("DATA.CSV")));
        assert!(!parser.can_handle(&input, Some("data.txt")));
        assert!(!parser.can_handle(&input, None));
    }
}
