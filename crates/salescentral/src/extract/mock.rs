//! In-memory store API for tests and offline runs.

use std::collections::HashSet;

use serde_json::Value as Json;

use crate::error::{Result, SalesCentralError};

use super::StoreApi;

/// Store API that serves a fixed list of store records.
#[derive(Debug, Clone, Default)]
pub struct MockStoreApi {
    stores: Vec<Json>,
    failing: HashSet<usize>,
}

impl MockStoreApi {
    /// Serve `stores`; store number `n` is `stores[n - 1]`.
    pub fn new(stores: Vec<Json>) -> Self {
        Self {
            stores,
            failing: HashSet::new(),
        }
    }

    /// Make requests for `store_number` fail.
    pub fn failing_on(mut self, store_number: usize) -> Self {
        self.failing.insert(store_number);
        self
    }
}

impl StoreApi for MockStoreApi {
    fn number_of_stores(&self) -> Result<usize> {
        Ok(self.stores.len())
    }

    fn store_details(&self, store_number: usize) -> Result<Json> {
        if self.failing.contains(&store_number) {
            return Err(SalesCentralError::NotFound(format!("store {}", store_number)));
        }
        store_number
            .checked_sub(1)
            .and_then(|i| self.stores.get(i))
            .cloned()
            .ok_or_else(|| SalesCentralError::NotFound(format!("store {}", store_number)))
    }
}
