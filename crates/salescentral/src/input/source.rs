//! Metadata about where a raw table came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about an extracted source table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File path or remote locator.
    pub location: String,
    /// SHA-256 hash of the raw contents.
    pub hash: String,
    /// Raw size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, json, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the extraction was performed.
    pub extracted_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a table that has just been read.
    pub fn new(
        location: String,
        hash: String,
        size_bytes: u64,
        format: impl Into<String>,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            location,
            hash,
            size_bytes,
            format: format.into(),
            row_count,
            column_count,
            extracted_at: Utc::now(),
        }
    }
}
