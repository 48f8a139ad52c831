//! Spreadsheet parser
//!
//! Reads the first sheet of an xlsx/xls/xlsm/xlsb/ods workbook. Columns whose
//! cells are all spreadsheet dates stay temporal; everything else goes
//! through the usual numeric coercion.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::{debug, span, Level};

use crate::core::{
    normalize_headers, ChartError, Column, ColumnValues, RawInput, Result, SourceKind, Table,
    TableParser,
};

/// Parser for spreadsheet workbooks
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetParser;

impl SpreadsheetParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| ChartError::parse_error(format!("Failed to parse spreadsheet: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ChartError::empty_table("Spreadsheet has no sheets"))?
            .map_err(|e| ChartError::parse_error(format!("Failed to read first sheet: {}", e)))?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ChartError::empty_table("Spreadsheet resulted in an empty table"))?;
        let headers = normalize_headers(header_row.iter().map(cell_text).collect());

        let data_rows: Vec<&[Data]> = rows
            .filter(|row| row.iter().any(|cell| !is_blank(cell)))
            .collect();
        if data_rows.is_empty() {
            return Err(ChartError::empty_table(
                "Spreadsheet resulted in an empty table",
            ));
        }

        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let cells: Vec<&Data> = data_rows
                    .iter()
                    .map(|row| row.get(index).unwrap_or(&Data::Empty))
                    .collect();
                build_column(name, &cells)
            })
            .collect();

        Table::new(columns)
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

fn build_column(name: String, cells: &[&Data]) -> Column {
    let all_dates = cells.iter().any(|cell| !is_blank(cell))
        && cells
            .iter()
            .all(|cell| is_blank(cell) || matches!(cell, Data::DateTime(_)));

    if all_dates {
        let values = cells
            .iter()
            .map(|cell| match cell {
                Data::DateTime(dt) => dt.as_datetime(),
                _ => None,
            })
            .collect();
        return Column::new(name, ColumnValues::DateTime(values));
    }

    Column::from_cells(name, cells.iter().map(|cell| cell_text(cell)).collect())
}

impl TableParser for SpreadsheetParser {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Spreadsheet
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["xlsx", "xls", "xlsm", "xlsb", "ods"]
    }

    fn can_handle(&self, _input: &RawInput, filename: Option<&str>) -> bool {
        self.claims_extension(filename)
    }

    fn parse(&self, input: &RawInput, filename: Option<&str>) -> Result<Table> {
        let parse_span = span!(
            Level::DEBUG,
            "parse_spreadsheet",
            filename,
            input_len = input.len()
        );
        let _enter = parse_span.enter();

        let bytes = input.as_bytes().ok_or(ChartError::InvalidInputKind {
            parser: "spreadsheet",
            expected: "bytes",
        })?;

        let table = self.parse_bytes(bytes)?;
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "Parsed first sheet"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_input_rejected() {
        let result = SpreadsheetParser::new().parse(&RawInput::from("a,b"), Some("book.xlsx"));
        assert_eq!(
            result,
            Err(ChartError::InvalidInputKind {
                parser: "spreadsheet",
                expected: "bytes",
            })
        );
    }

    #[test]
    fn test_corrupt_bytes_are_parse_errors() {
        let result = SpreadsheetParser::new().parse(
            &RawInput::from(b"definitely not a workbook".to_vec()),
            Some("book.xlsx"),
        );
        assert!(matches!(result, Err(ChartError::ParseError { .. })));
    }

    #[test]
    fn test_claims_spreadsheet_extensions() {
        let parser = SpreadsheetParser::new();
        let input = RawInput::from(vec![0u8; 4]);
        for name in ["a.xlsx", "a.XLS", "a.ods", "a.xlsm"] {
            assert!(parser.can_handle(&input, Some(name)), "{}", name);
        }
        assert!(!parser.can_handle(&input, Some("a.csv")));
        assert!(!parser.can_handle(&input, None));
    }

    #[test]
    fn test_cell_text_and_blank_detection() {
        assert_eq!(cell_text(&Data::Float(10.0)), "10");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert!(is_blank(&Data::Empty));
        assert!(is_blank(&Data::String("  ".to_string())));
        assert!(!is_blank(&Data::Bool(false)));
    }

    #[test]
    fn test_numeric_cells_become_numeric_column() {
        let cells = [Data::Float(1.0), Data::Float(2.5), Data::Empty];
        let refs: Vec<&Data> = cells.iter().collect();
        let column = build_column("v".to_string(), &refs);
        assert!(column.is_numeric());
    }
}
