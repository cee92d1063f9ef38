//! ETL job runner.

mod job;

pub use job::{EtlJob, JobOutcome};
