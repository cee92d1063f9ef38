//! Dynamically typed cell values.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// Text that source systems use for a missing value.
pub const NULL_LITERAL: &str = "NULL";

/// A single cell in a [`Table`](super::Table).
///
/// Extractors produce `Text` and `Null` cells (plus whatever scalar types a
/// JSON source carries); the cleaners resolve them into typed variants.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing value.
    #[default]
    Null,
    /// Free text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Decimal number.
    Number(f64),
    /// Boolean flag.
    Bool(bool),
    /// Calendar date.
    Date(NaiveDate),
    /// Date with time of day.
    DateTime(NaiveDateTime),
}

impl Value {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Returns true if this is a missing value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for the case-sensitive `"NULL"` text marker.
    pub fn is_null_literal(&self) -> bool {
        matches!(self, Value::Text(s) if s == NULL_LITERAL)
    }

    /// Borrow the text of a `Text` cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of `Integer` and `Number` cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    /// Render a non-null value as text; `Null` stays `Null`.
    pub fn into_text(self) -> Self {
        match self {
            Value::Null | Value::Text(_) => self,
            other => Value::Text(other.to_string()),
        }
    }

    /// Short tag naming the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Type tag and rendering used to compare rows.
    pub(crate) fn fingerprint(&self) -> (&'static str, String) {
        let rendered = match self {
            // Bit pattern keeps 0.1 and 0.10000000000000001 apart.
            Value::Number(n) => n.to_bits().to_string(),
            other => other.to_string(),
        };
        (self.type_name(), rendered)
    }

    /// Convert a JSON scalar into a cell value.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            nested => Value::Text(nested.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Date(_) | Value::DateTime(_) => serializer.collect_str(self),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}
