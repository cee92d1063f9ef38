//! Orders fact table.

use crate::dataset::Dataset;
use crate::error::{Result, SalesCentralError};
use crate::normalize::to_integer;
use crate::table::Table;
use crate::validation::{UuidFilter, apply_filter};

use super::DataCleaner;

const KEY: &str = "index";

/// Internal row counter some exports carry alongside `index`.
const LEVEL_INDEX: &str = "level_0";

const ORDER_ID: &str = "order_id";

/// Personal names and a stray unnamed column.
const DROPPED_COLUMNS: &[&str] = &["first_name", "last_name", "1"];

impl DataCleaner {
    /// Clean the orders table.
    ///
    /// Customer names are removed, `user_uuid` must be canonical, the row
    /// counter becomes `order_id` and `product_quantity` an integer.
    pub fn clean_orders_data(&self, table: Table) -> Result<Table> {
        let dataset = Dataset::Orders.name();
        let table = table.drop_columns(DROPPED_COLUMNS);
        let table = self.row_clean(Dataset::Orders, table, Some(KEY));

        table.require_column(dataset, "product_quantity")?;
        let table = apply_filter(table, dataset, &UuidFilter::strict("user_uuid"))?;

        let table = if table.has_column(LEVEL_INDEX) {
            table.rename_column(LEVEL_INDEX, ORDER_ID)
        } else if table.key_name.as_deref() == Some(KEY) {
            table.rename_column(KEY, ORDER_ID)
        } else {
            return Err(SalesCentralError::missing_column(dataset, KEY));
        };

        Ok(table
            .drop_nulls()
            .map_column("product_quantity", to_integer)
            .drop_nulls())
    }
}
