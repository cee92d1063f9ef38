//! Warehouse table definitions for each dataset.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

use super::types::ColumnTypes;

/// Name of the combined date-time column.
pub const DATE_TIME_COLUMN: &str = "date_time";

/// Destination table, primary key and column types for a cleaned dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSchema {
    /// Warehouse table name.
    pub table: String,
    /// Primary key column, if one is declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
    /// Types applied after upload.
    pub column_types: ColumnTypes,
}

impl TargetSchema {
    fn new(table: &str, primary_key: &str, column_types: ColumnTypes) -> Self {
        Self {
            table: table.to_string(),
            primary_key: Some(primary_key.to_string()),
            column_types,
        }
    }

    /// Schema for a dataset as loaded by default.
    pub fn for_dataset(dataset: Dataset) -> Self {
        match dataset {
            Dataset::Users => Self::new(
                "dim_users",
                "user_uuid",
                [
                    ("first_name", "VARCHAR(255)"),
                    ("last_name", "VARCHAR(255)"),
                    ("date_of_birth", "DATE"),
                    ("country_code", "VARCHAR(2)"),
                    ("user_uuid", "UUID USING user_uuid::uuid"),
                    ("join_date", "DATE"),
                ]
                .into_iter()
                .collect(),
            ),
            Dataset::Cards => Self::new(
                "dim_card_details",
                "card_number",
                [
                    ("card_number", "VARCHAR(19)"),
                    ("expiry_date", "VARCHAR(5)"),
                    ("date_payment_confirmed", "DATE"),
                ]
                .into_iter()
                .collect(),
            ),
            Dataset::Stores => Self::new(
                "dim_store_details",
                "store_code",
                [
                    ("longitude", "FLOAT"),
                    ("locality", "VARCHAR(255)"),
                    ("store_code", "VARCHAR(12)"),
                    ("staff_numbers", "SMALLINT"),
                    ("opening_date", "DATE"),
                    ("store_type", "VARCHAR(255)"),
                    ("latitude", "FLOAT"),
                    ("country_code", "VARCHAR(2)"),
                    ("continent", "VARCHAR(255)"),
                ]
                .into_iter()
                .collect(),
            ),
            Dataset::Products => Self::new(
                "dim_products",
                "product_code",
                [
                    ("product_price_pounds", "FLOAT"),
                    ("weight_kg", "FLOAT"),
                    ("ean", "VARCHAR(17)"),
                    ("product_code", "VARCHAR(11)"),
                    ("date_added", "DATE"),
                    ("uuid", "UUID USING uuid::uuid"),
                    ("still_available", "BOOL"),
                    ("weight_class", "VARCHAR(14)"),
                ]
                .into_iter()
                .collect(),
            ),
            Dataset::Orders => Self::new(
                "orders_table",
                "order_id",
                [
                    ("order_id", "BIGINT"),
                    ("date_uuid", "UUID"),
                    ("user_uuid", "UUID"),
                    ("card_number", "VARCHAR(19)"),
                    ("store_code", "VARCHAR(12)"),
                    ("product_code", "VARCHAR(11)"),
                    ("product_quantity", "SMALLINT"),
                ]
                .into_iter()
                .collect(),
            ),
            Dataset::DateTimes => Self::new(
                "dim_date_times",
                "date_uuid",
                [
                    ("timestamp", "TIME"),
                    ("month", "VARCHAR(2)"),
                    ("year", "VARCHAR(4)"),
                    ("day", "VARCHAR(2)"),
                    ("time_period", "VARCHAR(10)"),
                    ("date_uuid", "UUID"),
                ]
                .into_iter()
                .collect(),
            ),
        }
    }

    /// Date-time schema after `year`, `month`, `day` and `timestamp` have
    /// been folded into one column.
    pub fn combined_date_times() -> Self {
        let mut schema = Self::for_dataset(Dataset::DateTimes);
        schema.column_types = std::mem::take(&mut schema.column_types)
            .without("timestamp")
            .without("month")
            .without("year")
            .without("day")
            .with(DATE_TIME_COLUMN, "TIMESTAMP");
        schema
    }
}
