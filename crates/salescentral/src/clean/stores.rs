//! Store details from the store API.
//!
//! The first row is the web store. It has no address, coordinates or
//! locality, so those cells are null in the source. They are held as a
//! sentinel through cleaning and returned to null at the end; every other
//! row with a null is dropped.

use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::normalize::{
    coordinate_to_number, fix_continent, staff_numbers_to_integer, store_country_code, to_date,
};
use crate::table::{Record, Table, Value};

use super::DataCleaner;

const KEY: &str = "index";

/// Duplicate of `latitude` with unusable values.
const BAD_LATITUDE_COLUMN: &str = "lat";

/// Placeholder for the web store's missing cells.
pub const ONLINE_STORE_SENTINEL: &str = "N/A";

/// Columns whose normalizers reject the sentinel. A web store with a null
/// here is dropped like any other row.
const VALIDATED_COLUMNS: &[&str] = &["country_code", "staff_numbers", "opening_date"];

/// The web store row and the cells filled with the sentinel.
#[derive(Debug, Default)]
struct OnlineStore {
    row: Option<usize>,
    columns: Vec<String>,
}

impl OnlineStore {
    /// Fill the first row's nulls with the sentinel, remembering which
    /// columns were filled.
    fn fill(mut table: Table) -> (Table, Vec<String>) {
        let mut filled = Vec::new();
        if let Some(first) = table.rows.first_mut() {
            for (cell, column) in first.cells.iter_mut().zip(&table.columns) {
                if cell.is_null() {
                    *cell = Value::text(ONLINE_STORE_SENTINEL);
                    filled.push(column.clone());
                }
            }
        }
        (table, filled)
    }

    /// Find the filled row again after row cleaning.
    fn locate(table: &Table, filled: Vec<String>) -> Self {
        if filled.is_empty() {
            return Self::default();
        }
        let indices: Vec<usize> = filled.iter().filter_map(|c| table.column_index(c)).collect();
        let row = table.rows.iter().position(|r| {
            indices
                .iter()
                .all(|&i| r.cells[i].as_str() == Some(ONLINE_STORE_SENTINEL))
        });
        Self {
            row,
            columns: filled
                .into_iter()
                .filter(|c| !VALIDATED_COLUMNS.contains(&c.as_str()))
                .collect(),
        }
    }

    fn is_exempt(&self, row: usize, column: &str) -> bool {
        self.row == Some(row) && self.columns.iter().any(|c| c == column)
    }

    /// Normalize a column, skipping the web store's sentinel cells.
    fn map_column(&self, mut table: Table, name: &str, mut f: impl FnMut(Value) -> Value) -> Table {
        let Some(index) = table.column_index(name) else {
            return table;
        };
        for (i, row) in table.rows.iter_mut().enumerate() {
            if self.is_exempt(i, name) {
                continue;
            }
            let value = std::mem::take(&mut row.cells[index]);
            row.cells[index] = f(value);
        }
        table
    }

    /// Drop rows with nulls, then put the web store's nulls back.
    fn drop_nulls_and_restore(self, mut table: Table) -> Table {
        let mut restored_row = None;
        let mut kept: Vec<Record> = Vec::with_capacity(table.rows.len());
        for (i, row) in std::mem::take(&mut table.rows).into_iter().enumerate() {
            if row.has_null() {
                continue;
            }
            if self.row == Some(i) {
                restored_row = Some(kept.len());
            }
            kept.push(row);
        }

        if let Some(r) = restored_row {
            for column in &self.columns {
                if let Some(index) = table.column_index(column) {
                    kept[r].cells[index] = Value::Null;
                }
            }
        }

        table.rows = kept;
        table
    }
}

impl DataCleaner {
    /// Clean the store details table.
    ///
    /// Country codes outside DE/US/GB drop the row. Continents are
    /// corrected, staff counts and coordinates made numeric, and opening
    /// dates parsed.
    pub fn clean_store_data(&self, table: Table) -> Result<Table> {
        let dataset = Dataset::Stores.name();
        let table = table.drop_columns(&[BAD_LATITUDE_COLUMN]);

        let (table, filled) = OnlineStore::fill(table);
        let table = self.row_clean(Dataset::Stores, table, Some(KEY));

        for column in [
            "country_code",
            "continent",
            "staff_numbers",
            "latitude",
            "longitude",
            "opening_date",
        ] {
            table.require_column(dataset, column)?;
        }

        let online = OnlineStore::locate(&table, filled);
        debug!(row = ?online.row, columns = ?online.columns, "Located web store row");

        let table = online.map_column(table, "country_code", store_country_code);
        let table = online.map_column(table, "continent", fix_continent);
        let table = online.map_column(table, "staff_numbers", staff_numbers_to_integer);
        let table = online.map_column(table, "latitude", coordinate_to_number);
        let table = online.map_column(table, "longitude", coordinate_to_number);
        let table = online.map_column(table, "opening_date", to_date);

        Ok(online.drop_nulls_and_restore(table))
    }
}
