//! Loaders committing cleaned tables to the warehouse.

mod csv;
mod sql;

use crate::error::{Result, SalesCentralError};
use crate::schema::ColumnTypes;
use crate::table::Table;

pub use self::csv::{CsvLoader, write_csv};
pub use self::sql::{SqlScriptLoader, quote_identifier, quote_literal};

/// Destination for cleaned tables.
pub trait Loader {
    /// Replace the contents of `destination` with `table`, declaring
    /// `primary_key` when given. The table's row key is written as its
    /// first column.
    fn upload(&mut self, table: &Table, destination: &str, primary_key: Option<&str>)
    -> Result<()>;

    /// Apply column types to an uploaded destination.
    fn retype(&mut self, destination: &str, column_types: &ColumnTypes) -> Result<()>;
}

/// The table as it is written: row key first, then the cells.
pub(crate) fn flatten(table: &Table) -> Table {
    table.clone().reset_key()
}

pub(crate) fn check_primary_key(
    table: &Table,
    destination: &str,
    primary_key: Option<&str>,
) -> Result<()> {
    match primary_key {
        Some(pk) if !table.has_column(pk) => Err(SalesCentralError::Load {
            destination: destination.to_string(),
            message: format!("primary key column '{}' is not in the table", pk),
        }),
        _ => Ok(()),
    }
}
