//! Summary of a cleaning run.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::table::Table;

/// Row and column counts before and after cleaning a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Dataset that was cleaned.
    pub dataset: Dataset,

    /// Rows in the raw table.
    pub rows_in: usize,

    /// Rows surviving cleaning.
    pub rows_out: usize,

    /// Columns in the cleaned table, key first.
    pub columns_out: Vec<String>,
}

impl CleaningReport {
    /// Build a report from the raw row count and the cleaned table.
    pub fn new(dataset: Dataset, rows_in: usize, cleaned: &Table) -> Self {
        let columns_out = cleaned
            .key_name
            .iter()
            .chain(cleaned.columns.iter())
            .cloned()
            .collect();

        Self {
            dataset,
            rows_in,
            rows_out: cleaned.row_count(),
            columns_out,
        }
    }

    /// Rows removed by cleaning.
    pub fn rows_removed(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }

    /// Share of raw rows kept, from 0.0 to 1.0. An empty input keeps all.
    pub fn retention(&self) -> f64 {
        if self.rows_in == 0 {
            1.0
        } else {
            self.rows_out as f64 / self.rows_in as f64
        }
    }
}
