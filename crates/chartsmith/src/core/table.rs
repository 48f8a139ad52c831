//! Normalized tabular data
//!
//! [`Table`] is the universal intermediate representation every parser
//! produces: ordered, uniquely named, equal-length columns, each coerced to
//! a single type. [`ParsedTable`] pairs a table with the parser that built it.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashSet;

use super::coerce::{all_date_like, coerce_column};
use super::error::{ChartError, Result};
use super::types::{CellValue, SourceKind};

/// Values of one column, all of a single inferred type
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Integer(Vec<i64>),
    /// Missing cells are `NaN`
    Float(Vec<f64>),
    /// Missing cells are empty strings
    Text(Vec<String>),
    /// Temporal cells read natively from a spreadsheet
    DateTime(Vec<Option<NaiveDateTime>>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
            ColumnValues::DateTime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the inferred type, as shown in previews
    pub fn kind_name(&self) -> &'static str {
        match self {
            ColumnValues::Integer(_) => "int64",
            ColumnValues::Float(_) => "float64",
            ColumnValues::Text(_) => "text",
            ColumnValues::DateTime(_) => "datetime",
        }
    }

    pub fn cell(&self, index: usize) -> Option<CellValue> {
        let value = match self {
            ColumnValues::Integer(v) => CellValue::Integer(*v.get(index)?),
            ColumnValues::Float(v) => CellValue::Float(*v.get(index)?),
            ColumnValues::Text(v) => CellValue::Text(v.get(index)?.clone()),
            ColumnValues::DateTime(v) => match v.get(index)? {
                Some(dt) => CellValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
                None => CellValue::Null,
            },
        };
        Some(value)
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a column from raw cells with best-effort numeric coercion
    pub fn from_cells(name: impl Into<String>, cells: Vec<String>) -> Self {
        Self::new(name, coerce_column(cells))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self.values,
            ColumnValues::Integer(_) | ColumnValues::Float(_)
        )
    }

    /// All values as figure cells, in row order
    pub fn cells(&self) -> Vec<CellValue> {
        (0..self.len()).filter_map(|i| self.values.cell(i)).collect()
    }

    /// Count of distinct non-missing values
    pub fn distinct_count(&self) -> usize {
        match &self.values {
            ColumnValues::Integer(v) => v.iter().collect::<HashSet<_>>().len(),
            ColumnValues::Float(v) => v
                .iter()
                .filter(|f| !f.is_nan())
                .map(|f| f.to_bits())
                .collect::<HashSet<_>>()
                .len(),
            ColumnValues::Text(v) => v
                .iter()
                .filter(|s| !s.trim().is_empty())
                .collect::<HashSet<_>>()
                .len(),
            ColumnValues::DateTime(v) => v.iter().flatten().collect::<HashSet<_>>().len(),
        }
    }

    /// True if the column is temporal or every text value parses as a date
    pub fn is_date_like(&self) -> bool {
        match &self.values {
            ColumnValues::DateTime(v) => v.iter().any(Option::is_some),
            ColumnValues::Text(v) => all_date_like(v.iter().map(String::as_str)),
            ColumnValues::Integer(_) | ColumnValues::Float(_) => false,
        }
    }
}

/// Ordered collection of equal-length, uniquely named columns with at least one row
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, enforcing the shape invariants
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let first = columns
            .first()
            .ok_or_else(|| ChartError::empty_table("table has no columns"))?;
        let rows = first.len();

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(ChartError::parse_error(format!(
                    "duplicate column name '{}'",
                    column.name()
                )));
            }
            if column.len() != rows {
                return Err(ChartError::parse_error(format!(
                    "column '{}' has {} rows, expected {}",
                    column.name(),
                    column.len(),
                    rows
                )));
            }
        }

        if rows == 0 {
            return Err(ChartError::empty_table("table has no data rows"));
        }

        Ok(Self { columns })
    }

    /// Build a table from a header and row-major string records
    ///
    /// Headers are normalized (trimmed, blanks named `Unnamed: <i>`,
    /// duplicates suffixed). Short rows are padded with missing cells; long
    /// rows are a parse error. Each column is coerced independently.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        let headers = normalize_headers(headers);
        if headers.is_empty() {
            return Err(ChartError::empty_table("no columns to parse"));
        }

        let width = headers.len();
        let mut cells: Vec<Vec<String>> = vec![Vec::with_capacity(records.len()); width];
        for (row_index, mut record) in records.into_iter().enumerate() {
            if record.len() > width {
                return Err(ChartError::parse_error(format!(
                    "expected {} fields in line {}, saw {}",
                    width,
                    row_index + 2,
                    record.len()
                )));
            }
            record.resize(width, String::new());
            for (column, cell) in cells.iter_mut().zip(record) {
                column.push(cell);
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::from_cells(name, values))
            .collect();
        Self::new(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn first_column(&self) -> &Column {
        &self.columns[0]
    }

    pub fn row_count(&self) -> usize {
        self.columns[0].len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Names of numeric columns, in table order
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(Column::name)
            .collect()
    }

    /// Names of non-numeric columns, in table order
    pub fn categorical_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| !c.is_numeric())
            .map(Column::name)
            .collect()
    }

    /// Row `index` as a JSON object keyed by column name
    pub fn row_record(&self, index: usize) -> serde_json::Map<String, serde_json::Value> {
        self.columns
            .iter()
            .filter_map(|c| {
                let cell = c.values().cell(index)?;
                let value = serde_json::to_value(cell).unwrap_or(serde_json::Value::Null);
                Some((c.name().to_string(), value))
            })
            .collect()
    }
}

/// Trim headers, name blanks and de-duplicate repeats
pub fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(headers.len());

    for (index, header) in headers.into_iter().enumerate() {
        let trimmed = header.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {}", index)
        } else {
            trimmed.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        result.push(name);
    }

    result
}

/// A table together with the parser that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    table: Table,
    source_kind: SourceKind,
}

impl ParsedTable {
    pub fn new(table: Table, source_kind: SourceKind) -> Self {
        Self { table, source_kind }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    pub fn into_table(self) -> Table {
        self.table
    }
}

/// Compact description of a table handed to the suggestion provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub column_types: Vec<(String, String)>,
    pub sample_rows: Vec<serde_json::Map<String, serde_json::Value>>,
    pub total_rows: usize,
}

impl TablePreview {
    /// Preview of the first `max_rows` rows
    pub fn new(table: &Table, max_rows: usize) -> Self {
        let columns = table
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let column_types = table
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), c.values().kind_name().to_string()))
            .collect();
        let sample_rows = (0..table.row_count().min(max_rows))
            .map(|i| table.row_record(i))
            .collect();
        Self {
            columns,
            column_types,
            sample_rows,
            total_rows: table.row_count(),
        }
    }
}
