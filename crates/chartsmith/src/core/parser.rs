//! Table parser trait
//!
//! A parser turns one raw input format into a [`Table`]. The dispatcher
//! probes parsers in priority order with [`TableParser::can_handle`] and
//! hands the input to the first that accepts it.

use super::error::Result;
use super::table::Table;
use super::types::{file_extension, RawInput, SourceKind};

/// Core trait for input format parsers
///
/// # Example
/// ```
/// use chartsmith::core::{RawInput, TableParser};
/// use chartsmith::plugins::parsers::CsvParser;
///
/// let parser = CsvParser::new();
/// let input = RawInput::from("a,b\n1,2");
/// assert!(parser.can_handle(&input, Some("data.csv")));
/// let table = parser.parse(&input, Some("data.csv")).unwrap();
/// assert_eq!(table.row_count(), 1);
/// ```
pub trait TableParser: Send + Sync {
    /// Which source kind tables from this parser carry
    fn source_kind(&self) -> SourceKind;

    /// Lowercased extensions, without the dot, this parser claims
    fn supported_extensions(&self) -> &'static [&'static str];

    /// Capability probe over the raw input and optional filename
    fn can_handle(&self, input: &RawInput, filename: Option<&str>) -> bool;

    /// Parse the input into a table
    fn parse(&self, input: &RawInput, filename: Option<&str>) -> Result<Table>;

    /// Registered parser name
    fn name(&self) -> &'static str {
        self.source_kind().as_str()
    }

    /// True if the filename's extension is one this parser claims
    fn claims_extension(&self, filename: Option<&str>) -> bool {
        file_extension(filename)
            .map(|ext| self.supported_extensions().contains(&ext.as_str()))
            .unwrap_or(false)
    }
}
