//! Extract, clean and load one dataset at a time.

use std::fs;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::clean::{CleaningReport, DataCleaner};
use crate::config::{EtlConfig, LoaderKind};
use crate::dataset::Dataset;
use crate::error::{Result, SalesCentralError};
use crate::extract::{
    DirectoryExtractor, Extractor, HttpStoreApi, RemoteExtractor, SourceLocator, StoreApi,
    retrieve_stores,
};
use crate::load::{CsvLoader, Loader, SqlScriptLoader};
use crate::schema::TargetSchema;
use crate::table::Table;

/// What happened to one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutcome {
    /// Row counts from cleaning.
    pub report: CleaningReport,
    /// Warehouse table written to.
    pub destination: String,
    /// False when the loader failed; the failure is logged.
    pub loaded: bool,
}

/// Runs the ETL for configured datasets.
pub struct EtlJob {
    config: EtlConfig,
    cleaner: DataCleaner,
    loader: Box<dyn Loader>,
    store_api: Option<Box<dyn StoreApi>>,
}

impl EtlJob {
    /// Create a job writing through `loader`.
    pub fn new(config: EtlConfig, loader: Box<dyn Loader>) -> Self {
        let cleaner = DataCleaner::with_config(config.cleaning.clone());
        Self {
            config,
            cleaner,
            loader,
            store_api: None,
        }
    }

    /// Create a job with the loader named in the config.
    pub fn from_config(config: EtlConfig) -> Result<Self> {
        let dir = &config.warehouse.output_dir;
        fs::create_dir_all(dir).map_err(|e| SalesCentralError::io(dir, e))?;

        let loader: Box<dyn Loader> = match config.warehouse.loader {
            LoaderKind::Sql => Box::new(SqlScriptLoader::new(
                dir.join(&config.warehouse.script_name),
            )),
            LoaderKind::Csv => Box::new(CsvLoader::new(dir)),
        };
        Ok(Self::new(config, loader))
    }

    /// Use `api` for store details instead of the configured HTTP endpoints.
    pub fn with_store_api(mut self, api: impl StoreApi + 'static) -> Self {
        self.store_api = Some(Box::new(api));
        self
    }

    pub fn config(&self) -> &EtlConfig {
        &self.config
    }

    /// Warehouse schema a dataset is loaded with.
    pub fn target_schema(&self, dataset: Dataset) -> TargetSchema {
        if dataset == Dataset::DateTimes && self.config.cleaning.combine_date_time {
            TargetSchema::combined_date_times()
        } else {
            dataset.target_schema()
        }
    }

    /// Read the raw table for `dataset` from its configured source.
    pub fn extract(&self, dataset: Dataset) -> Result<Table> {
        let source = self.config.source_for(dataset);
        info!(dataset = %dataset, source = %source, "Extracting");

        match source {
            SourceLocator::Table(name) => {
                DirectoryExtractor::new(&self.config.source.directory).read_table(&name)
            }
            SourceLocator::Remote(locator) => {
                RemoteExtractor::with_region(&self.config.remote.s3_region)?
                    .fetch_remote_table(&locator)
            }
            SourceLocator::StoreApi => match &self.store_api {
                Some(api) => extract_stores(api.as_ref()),
                None => {
                    let api = HttpStoreApi::new(self.config.store_api()?)?;
                    extract_stores(&api)
                }
            },
        }
    }

    /// Extract, clean and load one dataset.
    ///
    /// Extraction and cleaning errors are returned. A loader error is
    /// logged and reported through `loaded`.
    pub fn run(&mut self, dataset: Dataset) -> Result<JobOutcome> {
        let raw = self.extract(dataset)?;
        let (cleaned, report) = self.cleaner.clean_with_report(dataset, raw)?;

        let schema = self.target_schema(dataset);
        let loaded = match self.load(&cleaned, &schema) {
            Ok(()) => true,
            Err(e) => {
                error!(dataset = %dataset, destination = %schema.table, error = %e, "Load failed");
                false
            }
        };

        Ok(JobOutcome {
            report,
            destination: schema.table,
            loaded,
        })
    }

    /// Run every dataset in order, continuing past failures.
    pub fn run_all(&mut self) -> Vec<(Dataset, Result<JobOutcome>)> {
        self.run_datasets(Dataset::all())
    }

    pub fn run_datasets(&mut self, datasets: &[Dataset]) -> Vec<(Dataset, Result<JobOutcome>)> {
        datasets
            .iter()
            .map(|&dataset| {
                let outcome = self.run(dataset);
                if let Err(ref e) = outcome {
                    warn!(dataset = %dataset, error = %e, "Dataset skipped");
                }
                (dataset, outcome)
            })
            .collect()
    }

    fn load(&mut self, table: &Table, schema: &TargetSchema) -> Result<()> {
        self.loader
            .upload(table, &schema.table, schema.primary_key.as_deref())?;
        self.loader.retype(&schema.table, &schema.column_types)
    }
}

fn extract_stores(api: &dyn StoreApi) -> Result<Table> {
    let count = api.number_of_stores()?;
    Ok(retrieve_stores(api, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::MockStoreApi;
    use serde_json::json;
    use tempfile::TempDir;

    const UUID: &str = "123e4567-e89b-12d3-a456-426614174000";

    fn config(dir: &TempDir) -> EtlConfig {
        let mut config = EtlConfig::default();
        config.source.directory = dir.path().join("exports");
        config.warehouse.output_dir = dir.path().join("warehouse");
        config.warehouse.loader = LoaderKind::Csv;
        config
            .source
            .locators
            .insert(Dataset::Cards, "card_details".to_string());
        config
    }

    fn write_export(dir: &TempDir, name: &str, content: &str) {
        let exports = dir.path().join("exports");
        fs::create_dir_all(&exports).unwrap();
        fs::write(exports.join(name), content).unwrap();
    }

    fn store(code: &str, staff: &str) -> serde_json::Value {
        json!({
            "index": 1,
            "address": "Flat 72W, Sally isle",
            "longitude": "51.62907",
            "lat": null,
            "locality": "High Wycombe",
            "store_code": code,
            "staff_numbers": staff,
            "opening_date": "1996-10-25",
            "store_type": "Local",
            "latitude": "-0.7487262",
            "country_code": "GB",
            "continent": "eeEurope"
        })
    }

    #[test]
    fn test_run_cards_from_directory() {
        let dir = TempDir::new().unwrap();
        write_export(
            &dir,
            "card_details.csv",
            ",card_number,expiry_date,card_provider,date_payment_confirmed\n\
             0,??4971858637664481,09/26,VISA 16 digit,2015-11-25\n\
             1,NULL,NULL,NULL,NULL\n\
             2,3554954842403145,XXXX,JCB,2006-01-02\n",
        );

        let mut job = EtlJob::from_config(config(&dir)).unwrap();
        let outcome = job.run(Dataset::Cards).unwrap();

        assert!(outcome.loaded);
        assert_eq!(outcome.destination, "dim_card_details");
        assert_eq!(outcome.report.rows_in, 3);
        assert_eq!(outcome.report.rows_out, 1);

        let written =
            fs::read_to_string(dir.path().join("warehouse/dim_card_details.csv")).unwrap();
        assert!(written.starts_with("Unnamed: 0,card_number"));
        assert!(written.contains("4971858637664481"));
        assert!(!written.contains("??"));
    }

    #[test]
    fn test_run_stores_from_api() {
        let dir = TempDir::new().unwrap();
        let api = MockStoreApi::new(vec![store("HI-9B97EE4E", "J34"), store("LO-1", "12")])
            .failing_on(3);
        let mut job = EtlJob::from_config(config(&dir)).unwrap().with_store_api(api);

        let outcome = job.run(Dataset::Stores).unwrap();
        assert_eq!(outcome.destination, "dim_store_details");
        assert!(outcome.loaded);
        assert_eq!(outcome.report.rows_in, 2);
    }

    #[test]
    fn test_missing_table_is_returned() {
        let dir = TempDir::new().unwrap();
        write_export(&dir, "other.csv", "a\n1\n");
        let mut job = EtlJob::from_config(config(&dir)).unwrap();

        let err = job.run(Dataset::Orders).unwrap_err();
        assert!(err.to_string().contains("orders_table"));
    }

    #[test]
    fn test_load_failure_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        // Typed columns missing from the table make retype fail.
        write_export(
            &dir,
            "legacy_users.csv",
            &format!(
                "index,country,country_code,phone_number,date_of_birth,join_date,user_uuid,email_address,address\n\
                 0,United Kingdom,GGB,07700900077,1968-10-16,2005-01-27,{},a@b.com,1 Road\n",
                UUID
            ),
        );
        let mut job = EtlJob::from_config(config(&dir)).unwrap();

        let outcome = job.run(Dataset::Users).unwrap();
        assert_eq!(outcome.report.rows_out, 1);
        assert!(!outcome.loaded);
    }

    #[test]
    fn test_run_all_continues_past_failures() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.source.locators.extend([
            (Dataset::Products, "products".to_string()),
            (Dataset::DateTimes, "date_details".to_string()),
        ]);
        write_export(
            &dir,
            "date_details.json",
            &format!(
                r#"{{"timestamp": {{"0": "22:00:06"}}, "month": {{"0": "9"}}, "year": {{"0": "2012"}},
                    "day": {{"0": "19"}}, "time_period": {{"0": "Evening"}}, "date_uuid": {{"0": "{}"}}}}"#,
                UUID
            ),
        );

        let mut job = EtlJob::from_config(config)
            .unwrap()
            .with_store_api(MockStoreApi::new(vec![store("LO-1", "12")]));
        let results = job.run_all();

        assert_eq!(results.len(), Dataset::all().len());
        let date_times = results
            .iter()
            .find(|(d, _)| *d == Dataset::DateTimes)
            .unwrap();
        let outcome = date_times.1.as_ref().unwrap();
        assert_eq!(outcome.report.rows_out, 1);
        assert!(outcome.loaded);
        assert!(
            results
                .iter()
                .find(|(d, _)| *d == Dataset::Users)
                .unwrap()
                .1
                .is_err()
        );
    }

    #[test]
    fn test_combined_date_time_schema() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.cleaning.combine_date_time = true;
        let job = EtlJob::new(config, Box::new(CsvLoader::new(dir.path())));
        let schema = job.target_schema(Dataset::DateTimes);
        assert_eq!(schema.column_types.get("date_time"), Some("TIMESTAMP"));
        assert!(schema.column_types.get("year").is_none());
    }
}
