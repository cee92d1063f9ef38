//! Dataset cleaners.
//!
//! Each cleaner is a fixed sequence of row cleaning, field normalizers and
//! record filters. A bad value never fails a run: it becomes null and its
//! row is dropped. The only error a cleaner returns is a missing column.

mod cards;
mod date_times;
mod orders;
mod products;
mod report;
mod rows;
mod stores;
mod users;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::table::Table;

pub use date_times::combine_date_time;
pub use report::CleaningReport;
pub use rows::clean_rows;
pub use stores::ONLINE_STORE_SENTINEL;

/// Options shared by all cleaners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Remove exact duplicate rows during row cleaning.
    pub deduplicate: bool,
    /// Datasets that keep their duplicates even when `deduplicate` is set.
    pub skip_dedupe: Vec<Dataset>,
    /// Fold date-time parts into a single `date_time` column.
    pub combine_date_time: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            deduplicate: true,
            skip_dedupe: Vec::new(),
            combine_date_time: false,
        }
    }
}

impl CleanerConfig {
    /// Whether duplicates are removed for `dataset`.
    pub fn dedupes(&self, dataset: Dataset) -> bool {
        self.deduplicate && !self.skip_dedupe.contains(&dataset)
    }
}

/// Runs the per-dataset cleaning pipelines.
#[derive(Debug, Clone, Default)]
pub struct DataCleaner {
    config: CleanerConfig,
}

impl DataCleaner {
    /// Create a cleaner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cleaner with custom options.
    pub fn with_config(config: CleanerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Clean a raw table for `dataset`.
    ///
    /// Products have their weights converted before cleaning.
    pub fn clean(&self, dataset: Dataset, table: Table) -> Result<Table> {
        match dataset {
            Dataset::Users => self.clean_user_data(table),
            Dataset::Cards => self.clean_card_data(table),
            Dataset::Stores => self.clean_store_data(table),
            Dataset::Products => {
                let converted = self.convert_product_weights(table)?;
                self.clean_products_data(converted)
            }
            Dataset::Orders => self.clean_orders_data(table),
            Dataset::DateTimes => self.clean_date_times(table),
        }
    }

    /// Clean a raw table and summarize what was kept.
    pub fn clean_with_report(
        &self,
        dataset: Dataset,
        table: Table,
    ) -> Result<(Table, CleaningReport)> {
        let rows_in = table.row_count();
        let cleaned = self.clean(dataset, table)?;
        let report = CleaningReport::new(dataset, rows_in, &cleaned);

        info!(
            dataset = %dataset,
            rows_in = report.rows_in,
            rows_out = report.rows_out,
            removed = report.rows_removed(),
            "Cleaned dataset"
        );
        Ok((cleaned, report))
    }

    fn row_clean(&self, dataset: Dataset, table: Table, key: Option<&str>) -> Table {
        clean_rows(table, key, self.config.dedupes(dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_defaults_on() {
        let config = CleanerConfig::default();
        for dataset in Dataset::all() {
            assert!(config.dedupes(*dataset));
        }
    }

    #[test]
    fn test_skip_dedupe() {
        let config = CleanerConfig {
            skip_dedupe: vec![Dataset::Orders],
            ..CleanerConfig::default()
        };
        assert!(!config.dedupes(Dataset::Orders));
        assert!(config.dedupes(Dataset::Users));
    }

    #[test]
    fn test_config_from_toml() {
        let config: CleanerConfig =
            toml::from_str("skip_dedupe = [\"date_times\"]\ncombine_date_time = true").unwrap();
        assert!(config.deduplicate);
        assert_eq!(config.skip_dedupe, vec![Dataset::DateTimes]);
        assert!(config.combine_date_time);
    }
}
