//! ETL run configuration, read from TOML.
//!
//! ```toml
//! [source]
//! directory = "exports"
//!
//! [source.locators]
//! products = "s3://data-handling-public/products.csv"
//!
//! [remote]
//! api_key = "..."
//!
//! [warehouse]
//! output_dir = "warehouse"
//! loader = "sql"
//!
//! [cleaning]
//! skip_dedupe = ["orders"]
//! combine_date_time = true
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::clean::CleanerConfig;
use crate::dataset::Dataset;
use crate::error::{Result, SalesCentralError};
use crate::extract::{DEFAULT_S3_REGION, SourceLocator, StoreApiConfig};

/// Environment variable overriding `remote.api_key`.
pub const API_KEY_ENV: &str = "SALESCENTRAL_API_KEY";

pub const DEFAULT_NUMBER_OF_STORES_URL: &str =
    "https://aqj7u5id95.execute-api.eu-west-1.amazonaws.com/prod/number_stores";
pub const DEFAULT_STORE_DETAILS_URL: &str =
    "https://aqj7u5id95.execute-api.eu-west-1.amazonaws.com/prod/store_details";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    pub source: SourceConfig,
    pub remote: RemoteConfig,
    pub warehouse: WarehouseConfig,
    pub cleaning: CleanerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory holding the exported source tables.
    pub directory: PathBuf,
    /// Per-dataset locator overrides.
    pub locators: BTreeMap<Dataset, String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("exports"),
            locators: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub api_key: Option<String>,
    pub number_of_stores_url: String,
    pub store_details_url: String,
    pub s3_region: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            number_of_stores_url: DEFAULT_NUMBER_OF_STORES_URL.to_string(),
            store_details_url: DEFAULT_STORE_DETAILS_URL.to_string(),
            s3_region: DEFAULT_S3_REGION.to_string(),
        }
    }
}

/// Which loader the warehouse is written with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderKind {
    #[default]
    Sql,
    Csv,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    pub output_dir: PathBuf,
    pub loader: LoaderKind,
    /// Script file name used by the SQL loader, relative to `output_dir`.
    pub script_name: String,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("warehouse"),
            loader: LoaderKind::Sql,
            script_name: "sales_data.sql".to_string(),
        }
    }
}

impl EtlConfig {
    /// Read a config file, applying the API key environment override.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SalesCentralError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml(&content)?;
        Ok(config.with_env_overrides())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SalesCentralError::Config(format!("Invalid config: {}", e)))
    }

    /// Apply `SALESCENTRAL_API_KEY` when it is set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.remote.api_key = Some(key);
            }
        }
        self
    }

    /// Where `dataset` is read from.
    pub fn source_for(&self, dataset: Dataset) -> SourceLocator {
        let locator = self
            .source
            .locators
            .get(&dataset)
            .map(String::as_str)
            .unwrap_or_else(|| dataset.default_source());
        SourceLocator::parse(locator)
    }

    /// Store API settings. Fails when no API key is configured.
    pub fn store_api(&self) -> Result<StoreApiConfig> {
        let api_key = self.remote.api_key.clone().ok_or_else(|| {
            SalesCentralError::Config(format!(
                "no store API key: set remote.api_key or {}",
                API_KEY_ENV
            ))
        })?;
        Ok(StoreApiConfig {
            api_key,
            number_of_stores_url: self.remote.number_of_stores_url.clone(),
            store_details_url: self.remote.store_details_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EtlConfig::from_toml("").unwrap();
        assert_eq!(config.source.directory, PathBuf::from("exports"));
        assert_eq!(config.warehouse.loader, LoaderKind::Sql);
        assert_eq!(config.remote.s3_region, "eu-west-1");
        assert!(config.cleaning.deduplicate);
        assert_eq!(
            config.source_for(Dataset::Stores),
            SourceLocator::StoreApi
        );
        assert_eq!(
            config.source_for(Dataset::Users),
            SourceLocator::Table("legacy_users".to_string())
        );
    }

    #[test]
    fn test_full_config() {
        let config = EtlConfig::from_toml(
            r#"
            [source]
            directory = "/data/exports"

            [source.locators]
            products = "products_export"

            [remote]
            api_key = "secret"
            s3_region = "us-east-1"

            [warehouse]
            output_dir = "out"
            loader = "csv"

            [cleaning]
            skip_dedupe = ["orders"]
            combine_date_time = true
            "#,
        )
        .unwrap();

        assert_eq!(config.warehouse.loader, LoaderKind::Csv);
        assert_eq!(
            config.source_for(Dataset::Products),
            SourceLocator::Table("products_export".to_string())
        );
        assert!(!config.cleaning.dedupes(Dataset::Orders));
        assert!(config.cleaning.combine_date_time);
        assert_eq!(config.store_api().unwrap().api_key, "secret");
    }

    #[test]
    fn test_missing_api_key() {
        let config = EtlConfig::default();
        let err = config.store_api().unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_invalid_config() {
        assert!(EtlConfig::from_toml("[warehouse]\nloader = \"parquet\"").is_err());
        assert!(EtlConfig::load("/nonexistent/salescentral.toml").is_err());
    }
}
