//! Store details REST API.

use std::time::Duration;

use indexmap::IndexMap;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value as Json;
use tracing::{error, info, warn};

use crate::error::{Result, SalesCentralError};
use crate::table::{Table, Value};

/// Field holding the count in the number-of-stores response.
const NUMBER_OF_STORES_FIELD: &str = "number_stores";

/// Read access to the store API.
pub trait StoreApi {
    /// Total number of stores.
    fn number_of_stores(&self) -> Result<usize>;

    /// Details for one store, numbered from 1.
    fn store_details(&self, store_number: usize) -> Result<Json>;
}

/// Endpoints and credentials for the store API.
#[derive(Debug, Clone)]
pub struct StoreApiConfig {
    pub api_key: String,
    pub number_of_stores_url: String,
    /// Base URL; the store number is appended as a path segment.
    pub store_details_url: String,
}

/// Store API over HTTPS, authenticated with an `x-api-key` header.
pub struct HttpStoreApi {
    client: Client,
    config: StoreApiConfig,
}

impl HttpStoreApi {
    pub fn new(config: StoreApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                SalesCentralError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.config.api_key)
                .map_err(|e| SalesCentralError::Config(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    fn get_json(&self, url: &str) -> Result<Json> {
        let json = self
            .client
            .get(url)
            .headers(self.build_headers()?)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(json)
    }
}

impl StoreApi for HttpStoreApi {
    fn number_of_stores(&self) -> Result<usize> {
        let body = self.get_json(&self.config.number_of_stores_url)?;
        body.get(NUMBER_OF_STORES_FIELD)
            .and_then(Json::as_u64)
            .map(|n| n as usize)
            .ok_or_else(|| {
                SalesCentralError::NotATable(format!(
                    "store count response has no '{}' field",
                    NUMBER_OF_STORES_FIELD
                ))
            })
    }

    fn store_details(&self, store_number: usize) -> Result<Json> {
        let url = format!(
            "{}/{}",
            self.config.store_details_url.trim_end_matches('/'),
            store_number
        );
        self.get_json(&url)
    }
}

/// Fetch stores `1..=count` one at a time into a table.
///
/// A store that cannot be fetched is logged and skipped. Columns are the
/// union of the response fields in first-seen order.
pub fn retrieve_stores(api: &dyn StoreApi, count: usize) -> Table {
    let mut records: Vec<IndexMap<String, Value>> = Vec::with_capacity(count);

    for store_number in 1..=count {
        match api.store_details(store_number) {
            Ok(Json::Object(fields)) => {
                records.push(
                    fields
                        .iter()
                        .map(|(k, v)| (k.clone(), Value::from_json(v)))
                        .collect(),
                );
            }
            Ok(_) => {
                warn!(store_number, "Store details response is not an object, skipping");
            }
            Err(e) => {
                error!(store_number, error = %e, "Error retrieving store details");
            }
        }
    }

    info!(requested = count, retrieved = records.len(), "Retrieved store details");
    Table::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::MockStoreApi;
    use serde_json::json;

    #[test]
    fn test_failed_stores_are_skipped() {
        let api = MockStoreApi::new(vec![
            json!({"index": 0, "store_code": "WEB-1388012W", "country_code": "GB"}),
            json!({"index": 1, "store_code": "HI-9B97EE4E", "country_code": "GB"}),
            json!({"index": 2, "store_code": "PA-1234ABCD", "extra": true}),
        ])
        .failing_on(2);

        let table = retrieve_stores(&api, api.number_of_stores().unwrap());
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns, vec!["index", "store_code", "country_code", "extra"]);
        assert_eq!(table.get(1, "extra"), Some(&Value::Bool(true)));
        assert_eq!(table.get(1, "country_code"), Some(&Value::Null));
    }

    #[test]
    fn test_non_object_response_is_skipped() {
        let api = MockStoreApi::new(vec![json!([1, 2]), json!({"index": 1})]);
        let table = retrieve_stores(&api, 2);
        assert_eq!(table.row_count(), 1);
    }
}
