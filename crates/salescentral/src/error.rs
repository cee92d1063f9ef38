//! Error types for the salescentral library.
//!
//! Only structural problems surface as errors. Bad cell values never do:
//! the cleaners turn them into nulls and drop the affected rows.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for salescentral operations.
#[derive(Debug, Error)]
pub enum SalesCentralError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PDF text could not be extracted.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A named source table does not exist.
    #[error("Table '{0}' not found")]
    NotFound(String),

    /// Remote file type not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Input could not be interpreted as a table.
    #[error("Not a table: {0}")]
    NotATable(String),

    /// A dataset cleaner needs a column the input lacks.
    #[error("Dataset '{dataset}' is missing required column '{column}'")]
    MissingColumn { dataset: String, column: String },

    /// Empty input or no data rows.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Loader could not commit a table.
    #[error("Failed to load '{destination}': {message}")]
    Load {
        destination: String,
        message: String,
    },
}

impl SalesCentralError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SalesCentralError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_column(dataset: impl ToString, column: impl Into<String>) -> Self {
        SalesCentralError::MissingColumn {
            dataset: dataset.to_string(),
            column: column.into(),
        }
    }
}

/// Result type alias for salescentral operations.
pub type Result<T> = std::result::Result<T, SalesCentralError>;
