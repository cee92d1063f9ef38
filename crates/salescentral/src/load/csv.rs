//! CSV file loader.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, SalesCentralError};
use crate::schema::ColumnTypes;
use crate::table::Table;

use super::{Loader, check_primary_key, flatten};

/// Writes each destination to `<dir>/<destination>.csv`, with column types
/// recorded beside it in `<destination>.types.json`.
pub struct CsvLoader {
    dir: PathBuf,
}

impl CsvLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path a destination is written to.
    pub fn table_path(&self, destination: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", destination))
    }

    pub fn types_path(&self, destination: &str) -> PathBuf {
        self.dir.join(format!("{}.types.json", destination))
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| SalesCentralError::io(&self.dir, e))
    }
}

/// Write a table as CSV. Nulls become empty fields.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = ::csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.cells.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush().map_err(|e| SalesCentralError::io(path, e))?;
    Ok(())
}

/// Column names of a written CSV file.
fn read_header(path: &Path) -> Result<Vec<String>> {
    let mut reader = ::csv::Reader::from_path(path)?;
    Ok(reader.headers()?.iter().map(str::to_string).collect())
}

impl Loader for CsvLoader {
    fn upload(
        &mut self,
        table: &Table,
        destination: &str,
        primary_key: Option<&str>,
    ) -> Result<()> {
        let table = flatten(table);
        check_primary_key(&table, destination, primary_key)?;
        self.ensure_dir()?;

        let path = self.table_path(destination);
        write_csv(&table, &path)?;

        info!(
            destination,
            rows = table.row_count(),
            path = %path.display(),
            "Data uploaded"
        );
        Ok(())
    }

    fn retype(&mut self, destination: &str, column_types: &ColumnTypes) -> Result<()> {
        let table_path = self.table_path(destination);
        if !table_path.is_file() {
            return Err(SalesCentralError::Load {
                destination: destination.to_string(),
                message: "table has not been uploaded".to_string(),
            });
        }

        let header = read_header(&table_path)?;
        if let Some((column, _)) = column_types
            .iter()
            .find(|(column, _)| !header.iter().any(|h| h == column))
        {
            return Err(SalesCentralError::Load {
                destination: destination.to_string(),
                message: format!("cannot retype missing column '{}'", column),
            });
        }

        let path = self.types_path(destination);
        let file = File::create(&path).map_err(|e| SalesCentralError::io(&path, e))?;
        serde_json::to_writer_pretty(file, column_types)?;

        info!(destination, columns = column_types.len(), "Data types recorded");
        Ok(())
    }
}
