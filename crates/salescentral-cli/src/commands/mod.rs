//! CLI command implementations.

pub mod clean;
pub mod datasets;
pub mod run;
