//! SalesCentral: extract, clean and load retail sales data.
//!
//! Raw tables come from an exported operational database, remote CSV, JSON
//! and PDF files and a store details API. Each dataset has a fixed cleaning pipeline
//! that normalizes fields and drops rows that cannot be repaired, and the
//! cleaned tables are loaded into a star-schema warehouse.
//!
//! # Core Principles
//!
//! - **Values never fail a run**: a malformed value becomes null and its row
//!   is dropped
//! - **Structure does**: a missing column or table is an error
//! - **Pure transformations**: every cleaning step takes a table and returns
//!   a new one
//!
//! # Example
//!
//! ```no_run
//! use salescentral::{DataCleaner, Dataset, Parser};
//!
//! let (raw, _source) = Parser::new().parse_file("card_details.csv").unwrap();
//! let cleaned = DataCleaner::new().clean(Dataset::Cards, raw).unwrap();
//!
//! println!("Rows kept: {}", cleaned.row_count());
//! ```

pub mod clean;
pub mod config;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod input;
pub mod load;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod table;
pub mod validation;

pub use clean::{CleanerConfig, CleaningReport, DataCleaner};
pub use config::{EtlConfig, LoaderKind};
pub use dataset::Dataset;
pub use error::{Result, SalesCentralError};
pub use extract::{DirectoryExtractor, Extractor, RemoteExtractor, SourceLocator, StoreApi};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use load::{CsvLoader, Loader, SqlScriptLoader};
pub use pipeline::{EtlJob, JobOutcome};
pub use schema::{ColumnTypes, TargetSchema};
pub use table::{Record, Table, Value};
