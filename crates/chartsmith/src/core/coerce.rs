//! Column type inference
//!
//! Parsers hand raw cell strings to [`coerce_column`], which probes the whole
//! column for a numeric reading. A column is numeric only if every non-blank
//! cell parses; a single failure keeps the entire column as text. Date
//! detection for chart selection lives here too.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc, Weekday};

use super::table::ColumnValues;

/// Integer or floating point reading of a full column
#[derive(Debug, Clone, PartialEq)]
pub enum NumericValues {
    Integer(Vec<i64>),
    Float(Vec<f64>),
}

impl From<NumericValues> for ColumnValues {
    fn from(values: NumericValues) -> Self {
        match values {
            NumericValues::Integer(v) => ColumnValues::Integer(v),
            NumericValues::Float(v) => ColumnValues::Float(v),
        }
    }
}

/// Try to read every cell of a column as a number
///
/// Blank cells are missing values: they force a float column (as `NaN`) but
/// do not count as failures. A column with no non-blank cell is not numeric.
/// On failure the original cells are handed back untouched.
pub fn probe_numeric(cells: Vec<String>) -> Result<NumericValues, Vec<String>> {
    let mut ints = Vec::with_capacity(cells.len());
    let mut all_int = true;
    let mut seen_value = false;

    for cell in &cells {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            all_int = false;
            ints.push(None);
            continue;
        }
        seen_value = true;
        if all_int {
            match trimmed.parse::<i64>() {
                Ok(v) => {
                    ints.push(Some(v));
                    continue;
                }
                Err(_) => all_int = false,
            }
        }
        if parse_number(trimmed).is_none() {
            return Err(cells);
        }
        ints.push(None);
    }

    if !seen_value {
        return Err(cells);
    }

    if all_int {
        return Ok(NumericValues::Integer(ints.into_iter().flatten().collect()));
    }

    let floats = cells
        .iter()
        .map(|cell| parse_number(cell.trim()).unwrap_or(f64::NAN))
        .collect();
    Ok(NumericValues::Float(floats))
}

/// Coerce raw cells into the best column representation
pub fn coerce_column(cells: Vec<String>) -> ColumnValues {
    match probe_numeric(cells) {
        Ok(numeric) => numeric.into(),
        Err(cells) => ColumnValues::Text(cells),
    }
}

fn parse_number(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a single value under a permissive date grammar
///
/// Accepts ISO dates and datetimes, RFC 3339, common slash/dot/dash orders,
/// month-name forms, year-month (`2025-01`, `Jan 2025`), bare month names
/// (`Jan`, `March`, placed in the current year), and ISO week labels
/// (`2025-W20`, `2025-W20-3`).
pub fn parse_date_like(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    // Year-month labels need a day appended before chrono accepts them
    for (format, suffix) in [("%Y-%m-%d", "-01"), ("%Y/%m/%d", "/01")] {
        let candidate = format!("{}{}", value, suffix);
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    parse_month_label(value)
        .or_else(|| parse_iso_week(value))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Month number for a full or abbreviated English month name
fn month_number(name: &str) -> Option<u32> {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    if name.len() < 3 {
        return None;
    }
    if name == "sept" {
        return Some(9);
    }
    MONTH_NAMES
        .iter()
        .position(|full| *full == name || (name.len() == 3 && full.starts_with(name.as_str())))
        .map(|index| index as u32 + 1)
}

/// `Jan`, `March`, `Jan 2025`, `March-2025`, `2025 Mar`
fn parse_month_label(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value
        .split(|c: char| c.is_whitespace() || c == '-' || c == '/' || c == ',')
        .filter(|part| !part.is_empty())
        .collect();
    let (month, year) = match parts.as_slice() {
        [name] => (month_number(name)?, Utc::now().year()),
        [name, year] if year.len() == 4 => (month_number(name)?, year.parse().ok()?),
        [year, name] if year.len() == 4 => (month_number(name)?, year.parse().ok()?),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// `2025-W20` or `2025-W20-3` (ISO year, week, optional weekday 1-7)
fn parse_iso_week(value: &str) -> Option<NaiveDate> {
    let (year, rest) = value.split_once("-W").or_else(|| value.split_once("-w"))?;
    if year.len() != 4 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let (week, weekday) = match rest.split_once('-') {
        Some((week, day)) => (week, day.parse::<u8>().ok()?),
        None => (rest, 1),
    };
    if week.len() != 2 {
        return None;
    }
    let week: u32 = week.parse().ok()?;
    let weekday = match weekday {
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        7 => Weekday::Sun,
        _ => return None,
    };
    NaiveDate::from_isoywd_opt(year, week, weekday)
}

/// True if every non-blank value parses as a date and at least one exists
pub fn all_date_like<'a>(values: impl IntoIterator<Item = &'a str>) -> bool {
    let mut seen = false;
    for value in values {
        if value.trim().is_empty() {
            continue;
        }
        if parse_date_like(value).is_none() {
            return false;
        }
        seen = true;
    }
    seen
}
