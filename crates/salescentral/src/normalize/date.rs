//! Date parsing for inconsistently formatted source columns.

use chrono::{NaiveDate, NaiveDateTime};

use crate::table::Value;

/// Date layouts seen in the exports, tried in order. Month-first wins over
/// day-first for ambiguous numeric dates.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y %B %d",
    "%B %Y %d",
    "%d %B %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d-%b-%Y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a date written in any of the supported layouts.
pub fn parse_mixed_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Resolve a cell to a `Date`, or null when it cannot be read as one.
pub fn to_date(value: Value) -> Value {
    match value {
        Value::Date(_) => value,
        Value::DateTime(dt) => Value::Date(dt.date()),
        Value::Text(ref s) => parse_mixed_date(s).map(Value::Date).unwrap_or_default(),
        _ => Value::Null,
    }
}

/// Validate a card expiry written as `MM/YY`, returning it zero-padded.
pub fn parse_month_year(text: &str) -> Option<String> {
    let (month, year) = text.trim().split_once('/')?;
    if month.len() != 2 || year.len() != 2 {
        return None;
    }
    if !month.chars().chain(year.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let month_num: u32 = month.parse().ok()?;
    (1..=12).contains(&month_num).then(|| format!("{}/{}", month, year))
}

/// Resolve a card expiry cell, or null when it is not `MM/YY`.
pub fn to_month_year(value: Value) -> Value {
    match value {
        Value::Text(ref s) => parse_month_year(s).map(Value::Text).unwrap_or_default(),
        _ => Value::Null,
    }
}
