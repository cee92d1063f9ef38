//! Warehouse target schemas.

mod table;
mod types;

pub use table::{DATE_TIME_COLUMN, TargetSchema};
pub use types::{ColumnTypes, split_using};
