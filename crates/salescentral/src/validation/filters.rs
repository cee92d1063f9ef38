//! Row-level filters deciding whether a record survives cleaning.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::table::{Table, Value};

use super::identifiers::{is_valid_uuid, matches_uuid_shape};

/// Trait for record filters.
///
/// A filter looks at a single column; rows whose value it rejects are
/// removed.
pub trait RecordFilter {
    /// Column the filter reads.
    fn column(&self) -> &str;

    /// Returns true if the row holding `value` should be kept.
    fn accepts(&self, value: &Value) -> bool;

    /// Filter name used in logs.
    fn name(&self) -> &'static str;
}

/// Keep only rows accepted by `filter`. The filtered column must exist.
pub fn apply_filter(table: Table, dataset: &str, filter: &dyn RecordFilter) -> Result<Table> {
    let index = table.require_column(dataset, filter.column())?;
    let before = table.row_count();
    let table = table.retain_rows(|row| filter.accepts(&row.cells[index]));
    debug!(
        dataset,
        filter = filter.name(),
        column = filter.column(),
        removed = before - table.row_count(),
        "Applied record filter"
    );
    Ok(table)
}

/// UUID check on a column, strict or shape-only.
#[derive(Debug, Clone)]
pub struct UuidFilter {
    column: String,
    strict: bool,
}

impl UuidFilter {
    /// Require a canonical RFC 4122 UUID.
    pub fn strict(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            strict: true,
        }
    }

    /// Require only the 8-4-4-4-12 hex layout. Non-text values are rendered
    /// before matching.
    pub fn shape(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            strict: false,
        }
    }
}

impl RecordFilter for UuidFilter {
    fn column(&self) -> &str {
        &self.column
    }

    fn accepts(&self, value: &Value) -> bool {
        if self.strict {
            value.as_str().is_some_and(is_valid_uuid)
        } else {
            matches_uuid_shape(&value.to_string())
        }
    }

    fn name(&self) -> &'static str {
        if self.strict { "uuid" } else { "uuid_shape" }
    }
}

/// Requires a country code of exactly two characters.
#[derive(Debug, Clone)]
pub struct CountryCodeLengthFilter {
    column: String,
}

impl CountryCodeLengthFilter {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl RecordFilter for CountryCodeLengthFilter {
    fn column(&self) -> &str {
        &self.column
    }

    fn accepts(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|code| code.chars().count() == 2)
    }

    fn name(&self) -> &'static str {
        "country_code_length"
    }
}

/// Part of the day an event falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "Late_Hours")]
    LateHours,
    Morning,
    Midday,
    Evening,
}

impl TimePeriod {
    pub fn all() -> &'static [TimePeriod] {
        &[
            TimePeriod::LateHours,
            TimePeriod::Morning,
            TimePeriod::Midday,
            TimePeriod::Evening,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::LateHours => "Late_Hours",
            TimePeriod::Morning => "Morning",
            TimePeriod::Midday => "Midday",
            TimePeriod::Evening => "Evening",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TimePeriod::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown time period '{}'", s))
    }
}

/// Requires a recognised [`TimePeriod`] label (exact, case-sensitive).
#[derive(Debug, Clone)]
pub struct TimePeriodFilter {
    column: String,
}

impl TimePeriodFilter {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl RecordFilter for TimePeriodFilter {
    fn column(&self) -> &str {
        &self.column
    }

    fn accepts(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| s.parse::<TimePeriod>().is_ok())
    }

    fn name(&self) -> &'static str {
        "time_period"
    }
}
