//! Warehouse column type maps.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered column name → SQL type mapping applied after upload.
///
/// Types are PostgreSQL type expressions and may carry their own `USING`
/// clause, e.g. `UUID USING user_uuid::uuid`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnTypes(IndexMap<String, String>);

impl ColumnTypes {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column type, replacing any earlier entry for the column.
    pub fn with(mut self, column: impl Into<String>, sql_type: impl Into<String>) -> Self {
        self.0.insert(column.into(), sql_type.into());
        self
    }

    /// Remove a column from the mapping.
    pub fn without(mut self, column: &str) -> Self {
        self.0.shift_remove(column);
        self
    }

    /// Type for a column, if mapped.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(c, t)| (c.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<C: Into<String>, T: Into<String>> FromIterator<(C, T)> for ColumnTypes {
    fn from_iter<I: IntoIterator<Item = (C, T)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(c, t)| (c.into(), t.into())).collect())
    }
}

/// Split a type expression into the type and its optional `USING` cast.
pub fn split_using(sql_type: &str) -> (&str, Option<&str>) {
    let upper = sql_type.to_ascii_uppercase();
    match upper.find(" USING ") {
        Some(pos) => (
            sql_type[..pos].trim(),
            Some(sql_type[pos + " USING ".len()..].trim()),
        ),
        None => (sql_type.trim(), None),
    }
}
