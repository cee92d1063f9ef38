//! Tabular data model shared by every pipeline stage.

mod frame;
mod value;

pub use frame::{Record, Table};
pub use value::{NULL_LITERAL, Value};
