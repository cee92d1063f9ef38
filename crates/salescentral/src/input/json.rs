//! JSON table reader.
//!
//! Three layouts are accepted:
//!
//! - an array of objects, one per row
//! - an object of column → array of values
//! - an object of column → {row label → value}

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value as Json};

use crate::error::{Result, SalesCentralError};
use crate::table::{Table, Value};

/// Parse JSON text into a table.
pub fn parse_json_table(bytes: &[u8]) -> Result<Table> {
    let json: Json = serde_json::from_slice(bytes)?;
    json_to_table(&json)
}

/// Convert an already-decoded JSON document into a table.
pub fn json_to_table(json: &Json) -> Result<Table> {
    match json {
        Json::Array(items) => from_record_array(items),
        Json::Object(map) if map.values().all(Json::is_array) => Ok(from_column_arrays(map)),
        Json::Object(map) if map.values().all(Json::is_object) => Ok(from_column_objects(map)),
        Json::Object(_) => Err(SalesCentralError::NotATable(
            "object values must all be arrays or all be objects".to_string(),
        )),
        other => Err(SalesCentralError::NotATable(format!(
            "expected an array or object, found {}",
            json_kind(other)
        ))),
    }
}

fn from_record_array(items: &[Json]) -> Result<Table> {
    let records = items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Json::Object(map) => Ok(map
                .iter()
                .map(|(k, v)| (k.clone(), Value::from_json(v)))
                .collect::<IndexMap<_, _>>()),
            other => Err(SalesCentralError::NotATable(format!(
                "row {} is {}, not an object",
                i,
                json_kind(other)
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Table::from_records(records))
}

fn from_column_arrays(map: &Map<String, Json>) -> Table {
    let height = map
        .values()
        .filter_map(Json::as_array)
        .map(Vec::len)
        .max()
        .unwrap_or(0);

    let rows = (0..height).map(|row| {
        map.values()
            .map(|column| {
                column
                    .as_array()
                    .and_then(|values| values.get(row))
                    .map(Value::from_json)
                    .unwrap_or_default()
            })
            .collect::<Vec<Value>>()
    });

    Table::from_rows(map.keys().cloned(), rows)
}

fn from_column_objects(map: &Map<String, Json>) -> Table {
    let labels: IndexSet<&String> = map
        .values()
        .filter_map(Json::as_object)
        .flat_map(|column| column.keys())
        .collect();

    let rows = labels.iter().map(|label| {
        map.values()
            .map(|column| {
                column
                    .get(label.as_str())
                    .map(Value::from_json)
                    .unwrap_or_default()
            })
            .collect::<Vec<Value>>()
    });

    Table::from_rows(map.keys().cloned(), rows)
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
