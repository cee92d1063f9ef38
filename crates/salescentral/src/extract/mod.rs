//! Extractors producing raw tables from the source systems.
//!
//! - [`DirectoryExtractor`] reads tables exported from the operational
//!   database to a directory
//! - [`RemoteExtractor`] downloads CSV, JSON or PDF files over HTTPS or
//!   from S3
//! - [`retrieve_stores`] walks the store API through a [`StoreApi`]

mod directory;
mod mock;
mod remote;
mod store_api;

use std::fmt;

use crate::error::Result;
use crate::table::Table;

pub use directory::DirectoryExtractor;
pub use mock::MockStoreApi;
pub use remote::{DEFAULT_S3_REGION, RemoteExtractor, RemoteFormat, RemoteLocator};
pub use store_api::{HttpStoreApi, StoreApi, StoreApiConfig, retrieve_stores};

/// A source that can produce a table by name.
pub trait Extractor {
    /// Read the table identified by `source_id`.
    ///
    /// Fails with `NotFound` when the source has no such table.
    fn read_table(&self, source_id: &str) -> Result<Table>;
}

/// Locator keyword selecting the store API.
pub const STORE_API_SOURCE: &str = "api";

/// Where a dataset's raw table is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    /// A table in the export directory.
    Table(String),
    /// A remote file (`http(s)://` or `s3://`).
    Remote(String),
    /// The store API.
    StoreApi,
}

impl SourceLocator {
    pub fn parse(locator: &str) -> Self {
        let locator = locator.trim();
        if locator == STORE_API_SOURCE {
            SourceLocator::StoreApi
        } else if locator.contains("://") {
            SourceLocator::Remote(locator.to_string())
        } else {
            SourceLocator::Table(locator.to_string())
        }
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocator::Table(name) => write!(f, "table {}", name),
            SourceLocator::Remote(url) => f.write_str(url),
            SourceLocator::StoreApi => f.write_str("store API"),
        }
    }
}
