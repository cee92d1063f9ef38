//! Tables exported to a local directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SalesCentralError};
use crate::input::{Parser, SourceMetadata, content_hash, parse_card_pdf, parse_json_table};
use crate::table::Table;

use super::Extractor;

/// File extensions recognised as tables.
const TABLE_EXTENSIONS: &[&str] = &["csv", "json", "pdf"];

/// Reads `<id>.csv`, `<id>.json` or `<id>.pdf` from an export directory.
pub struct DirectoryExtractor {
    root: PathBuf,
    parser: Parser,
}

impl DirectoryExtractor {
    /// Create an extractor over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            parser: Parser::new(),
        }
    }

    /// Use a custom CSV parser.
    pub fn with_parser(mut self, parser: Parser) -> Self {
        self.parser = parser;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of the tables available, sorted.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| SalesCentralError::io(&self.root, e))?;

        let mut tables: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && table_extension(path).is_some())
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        tables.sort();
        tables.dedup();
        Ok(tables)
    }

    /// Read a table along with metadata about its file.
    pub fn read_table_with_metadata(&self, source_id: &str) -> Result<(Table, SourceMetadata)> {
        let path = self.locate(source_id)?;
        debug!(path = %path.display(), "Reading exported table");

        let format = match table_extension(&path) {
            Some(format @ ("json" | "pdf")) => format,
            _ => return self.parser.parse_file(&path),
        };

        let bytes = fs::read(&path).map_err(|e| SalesCentralError::io(&path, e))?;
        let table = if format == "pdf" {
            parse_card_pdf(&bytes)?
        } else {
            parse_json_table(&bytes)?
        };
        let metadata = SourceMetadata::new(
            path.display().to_string(),
            content_hash(&bytes),
            bytes.len() as u64,
            format,
            table.row_count(),
            table.column_count(),
        );
        Ok((table, metadata))
    }

    /// Path of a listed table, preferring CSV, then JSON, then PDF.
    fn locate(&self, source_id: &str) -> Result<PathBuf> {
        let tables = self.list_tables()?;
        if !tables.iter().any(|t| t == source_id) {
            return Err(SalesCentralError::NotFound(source_id.to_string()));
        }

        TABLE_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", source_id, ext)))
            .find(|path| path.is_file())
            .ok_or_else(|| SalesCentralError::NotFound(source_id.to_string()))
    }
}

impl Extractor for DirectoryExtractor {
    fn read_table(&self, source_id: &str) -> Result<Table> {
        self.read_table_with_metadata(source_id)
            .map(|(table, _)| table)
    }
}

fn table_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    TABLE_EXTENSIONS.iter().copied().find(|e| *e == ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn export_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("legacy_users.csv"), "index,first_name\n0,Ann\n").unwrap();
        fs::write(dir.path().join("date_details.json"), r#"{"month": {"0": "9"}}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a table").unwrap();
        dir
    }

    #[test]
    fn test_list_tables() {
        let dir = export_dir();
        let extractor = DirectoryExtractor::new(dir.path());
        assert_eq!(extractor.list_tables().unwrap(), vec!["date_details", "legacy_users"]);
    }

    #[test]
    fn test_read_csv_and_json() {
        let dir = export_dir();
        let extractor = DirectoryExtractor::new(dir.path());

        let users = extractor.read_table("legacy_users").unwrap();
        assert_eq!(users.columns, vec!["index", "first_name"]);

        let (dates, metadata) = extractor.read_table_with_metadata("date_details").unwrap();
        assert_eq!(dates.row_count(), 1);
        assert_eq!(metadata.format, "json");
        assert!(metadata.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_unreadable_pdf_is_an_error() {
        let dir = export_dir();
        fs::write(dir.path().join("card_details.pdf"), "card_number,expiry_date\n").unwrap();
        let extractor = DirectoryExtractor::new(dir.path());

        assert!(extractor.list_tables().unwrap().contains(&"card_details".to_string()));
        let err = extractor.read_table("card_details").unwrap_err();
        assert!(matches!(err, SalesCentralError::Pdf(_)));
    }

    #[test]
    fn test_unknown_table_is_not_found() {
        let dir = export_dir();
        let err = DirectoryExtractor::new(dir.path())
            .read_table("orders_table")
            .unwrap_err();
        assert!(matches!(err, SalesCentralError::NotFound(ref name) if name == "orders_table"));
        assert_eq!(err.to_string(), "Table 'orders_table' not found");
    }
}
