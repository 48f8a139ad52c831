//! Shared reader for delimiter-separated records

use crate::core::{ChartError, Result};

/// Header plus data records, blank lines dropped
pub(crate) struct Records {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read `text` with the csv reader using `delimiter`
///
/// Rows may have any width here; the table builder pads short rows and
/// rejects long ones.
pub(crate) fn read_records(text: &str, delimiter: u8, trim: bool) -> Result<Records> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(if trim { csv::Trim::All } else { csv::Trim::None })
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ChartError::parse_error(format!("Failed to read header row: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ChartError::parse_error(e.to_string()))?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Records { headers, rows })
}

/// Split lines on runs of whitespace
pub(crate) fn read_whitespace_records(text: &str) -> Records {
    let mut lines = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().map(str::to_string).collect::<Vec<_>>());

    let headers = lines.next().unwrap_or_default();
    Records {
        headers,
        rows: lines.collect(),
    }
}
