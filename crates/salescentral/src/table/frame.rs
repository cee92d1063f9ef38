//! In-memory tables passed between pipeline stages.

use indexmap::{IndexMap, IndexSet};

use crate::error::{Result, SalesCentralError};

use super::value::Value;

/// One row of a table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// Promoted row key, when the table has one.
    pub key: Option<Value>,
    /// Cells in column order.
    pub cells: Vec<Value>,
}

impl Record {
    /// Create a record without a key.
    pub fn new(cells: Vec<Value>) -> Self {
        Self { key: None, cells }
    }

    /// Returns true if the key or any cell is null.
    pub fn has_null(&self) -> bool {
        self.key.as_ref().is_some_and(Value::is_null) || self.cells.iter().any(Value::is_null)
    }

    /// Identity of the row for duplicate detection (key included). Each
    /// cell is a type tag and its rendering.
    pub fn fingerprint(&self) -> Vec<(&'static str, String)> {
        self.key
            .iter()
            .chain(&self.cells)
            .map(Value::fingerprint)
            .collect()
    }
}

/// Ordered rows over named columns.
///
/// Transformations consume the table and return a new one, so a cleaner
/// never observes a half-updated table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Column names in order (the promoted key column is not listed).
    pub columns: Vec<String>,
    /// Rows in order.
    pub rows: Vec<Record>,
    /// Name of the promoted key column, if any.
    pub key_name: Option<String>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            key_name: None,
        }
    }

    /// Create a table from positional rows. Short rows are padded with nulls
    /// and long rows truncated.
    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = Vec<Value>>,
    ) -> Self {
        let mut table = Self::new(columns);
        let width = table.column_count();
        table.rows = rows
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, Value::Null);
                Record::new(cells)
            })
            .collect();
        table
    }

    /// Create a table from name → value records. Columns are the union of
    /// names in first-seen order; absent entries become null.
    pub fn from_records(records: impl IntoIterator<Item = IndexMap<String, Value>>) -> Self {
        let records: Vec<_> = records.into_iter().collect();
        let columns: IndexSet<String> = records
            .iter()
            .flat_map(|r| r.keys().cloned())
            .collect();

        let rows: Vec<Vec<Value>> = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|c| record.swap_remove(c).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self::from_rows(columns, rows)
    }

    /// Get the number of columns (excluding the key).
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns true if the column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get the position of a column a dataset cleaner cannot work without.
    pub fn require_column(&self, dataset: impl ToString, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| SalesCentralError::missing_column(dataset, name))
    }

    /// Get a cell by row position and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.cells.get(index))
    }

    /// Get all values in a column.
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r.cells[index]).collect())
    }

    /// Get the row keys, if a key has been promoted.
    pub fn keys(&self) -> Option<Vec<&Value>> {
        self.key_name.as_ref()?;
        Some(
            self.rows
                .iter()
                .map(|r| r.key.as_ref().unwrap_or(&Value::Null))
                .collect(),
        )
    }

    /// Apply `f` to every cell of a column. Missing columns are left alone.
    pub fn map_column(self, name: &str, mut f: impl FnMut(Value) -> Value) -> Self {
        self.map_column_with(name, |_, value| f(value))
    }

    /// Apply `f` to every cell of a column, with read access to the rest of
    /// the row. The target cell reads as null while `f` runs.
    pub fn map_column_with(
        mut self,
        name: &str,
        mut f: impl FnMut(&Record, Value) -> Value,
    ) -> Self {
        let Some(index) = self.column_index(name) else {
            return self;
        };
        for row in &mut self.rows {
            let value = std::mem::take(&mut row.cells[index]);
            let mapped = f(row, value);
            row.cells[index] = mapped;
        }
        self
    }

    /// Apply `f` to every cell in the table.
    pub fn map_cells(mut self, mut f: impl FnMut(Value) -> Value) -> Self {
        for row in &mut self.rows {
            for cell in &mut row.cells {
                *cell = f(std::mem::take(cell));
            }
        }
        self
    }

    /// Append a column computed from each row. Replaces an existing column of
    /// the same name.
    pub fn with_column(mut self, name: &str, mut f: impl FnMut(&Record) -> Value) -> Self {
        match self.column_index(name) {
            Some(index) => {
                for row in &mut self.rows {
                    row.cells[index] = f(row);
                }
            }
            None => {
                for row in &mut self.rows {
                    let value = f(row);
                    row.cells.push(value);
                }
                self.columns.push(name.to_string());
            }
        }
        self
    }

    /// Rename a column. Missing columns are ignored; renaming the promoted
    /// key renames the key.
    pub fn rename_column(mut self, from: &str, to: &str) -> Self {
        if let Some(index) = self.column_index(from) {
            self.columns[index] = to.to_string();
        } else if self.key_name.as_deref() == Some(from) {
            self.key_name = Some(to.to_string());
        }
        self
    }

    /// Remove columns by name. Missing columns are ignored.
    pub fn drop_columns(mut self, names: &[&str]) -> Self {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !names.contains(&c.as_str()))
            .collect();
        if keep.iter().all(|k| *k) {
            return self;
        }

        self.columns = retain_by_mask(std::mem::take(&mut self.columns), &keep);
        for row in &mut self.rows {
            row.cells = retain_by_mask(std::mem::take(&mut row.cells), &keep);
        }
        self
    }

    /// Keep rows for which `predicate` is true.
    pub fn retain_rows(mut self, mut predicate: impl FnMut(&Record) -> bool) -> Self {
        self.rows.retain(|r| predicate(r));
        self
    }

    /// Remove every row containing a null cell.
    pub fn drop_nulls(self) -> Self {
        self.retain_rows(|r| !r.has_null())
    }

    /// Remove rows identical to an earlier row, keeping the first.
    pub fn drop_duplicates(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.rows.retain(|r| seen.insert(r.fingerprint()));
        self
    }

    /// Returns true if any row contains a null.
    pub fn has_nulls(&self) -> bool {
        self.rows.iter().any(Record::has_null)
    }

    /// Move a column out of the cells into the row key. Does nothing when the
    /// column is absent.
    pub fn promote_key(mut self, name: &str) -> Self {
        let Some(index) = self.column_index(name) else {
            return self;
        };
        self.columns.remove(index);
        for row in &mut self.rows {
            row.key = Some(row.cells.remove(index));
        }
        self.key_name = Some(name.to_string());
        self
    }

    /// Move the row key back in as the first column.
    pub fn reset_key(mut self) -> Self {
        let Some(name) = self.key_name.take() else {
            return self;
        };
        self.columns.insert(0, name);
        for row in &mut self.rows {
            let key = row.key.take().unwrap_or_default();
            row.cells.insert(0, key);
        }
        self
    }

    /// Rows as name → value maps, key first.
    pub fn to_records(&self) -> Vec<IndexMap<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = IndexMap::with_capacity(self.columns.len() + 1);
                if let Some(ref name) = self.key_name {
                    record.insert(name.clone(), row.key.clone().unwrap_or_default());
                }
                for (column, cell) in self.columns.iter().zip(&row.cells) {
                    record.insert(column.clone(), cell.clone());
                }
                record
            })
            .collect()
    }
}

fn retain_by_mask<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, k)| k.then_some(item))
        .collect()
}
