//! Core error types for chart creation
//!
//! Every failure the pipeline can report is a [`ChartError`]. All variants
//! except [`ChartError::Internal`] describe something the caller can fix
//! (a bad file, an unknown chart type, a missing column), which lets the
//! boundary layer map them to "bad request" rather than "server fault".

use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ChartError>;

/// Error taxonomy for parsing, chart selection and rendering
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error(
        "No parser found for input (filename={}, type={input_kind}, length={length}). Available parsers: {available:?}",
        .filename.as_deref().unwrap_or("None")
    )]
    NoParserFound {
        filename: Option<String>,
        input_kind: &'static str,
        length: usize,
        available: Vec<String>,
    },

    #[error("Empty input: {message}")]
    EmptyInput { message: String },

    #[error("Empty table: {message}")]
    EmptyTable { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid input kind: {parser} parser requires {expected} input")]
    InvalidInputKind {
        parser: &'static str,
        expected: &'static str,
    },

    #[error("{}", extraction_message(.last_error))]
    ExtractionFailed { last_error: Option<String> },

    #[error("Chart type '{requested}' not found. Available types: {available:?}")]
    UnknownChartType {
        requested: String,
        available: Vec<String>,
    },

    #[error("Column '{column}' not found. Available columns: {available:?}")]
    UnknownColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Invalid chart configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

fn extraction_message(last_error: &Option<String>) -> String {
    let mut message = String::from(
        "Could not extract tabular data from image. Configure a vision extraction credential \
         for the vision provider, or install an OCR toolchain for text recognition.",
    );
    if let Some(err) = last_error {
        message.push_str(" Vision provider error: ");
        message.push_str(err);
    }
    message
}

impl ChartError {
    /// Create a new empty-input error
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: message.into(),
        }
    }

    /// Create a new empty-table error
    pub fn empty_table(message: impl Into<String>) -> Self {
        Self::EmptyTable {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a new invalid-config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if the error was caused by the caller's input or request
    ///
    /// Only [`ChartError::Internal`] is a fault of the service itself.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }
}
