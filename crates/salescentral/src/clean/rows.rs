//! Row cleaning shared by every dataset cleaner.

use tracing::debug;

use crate::table::{Table, Value};

/// Replace `"NULL"` text with null, optionally drop exact duplicates, drop
/// every row holding a null, then promote `key` (when present) to the row
/// key.
///
/// Running it again on its own output changes nothing.
pub fn clean_rows(table: Table, key: Option<&str>, deduplicate: bool) -> Table {
    let rows_in = table.row_count();

    let mut table = table.map_cells(null_literal_to_null);
    for row in &mut table.rows {
        if let Some(ref mut k) = row.key {
            *k = null_literal_to_null(std::mem::take(k));
        }
    }

    let table = if deduplicate {
        table.drop_duplicates()
    } else {
        table
    };
    let table = table.drop_nulls();
    let table = match key {
        Some(name) => table.promote_key(name),
        None => table,
    };

    debug!(
        rows_in,
        rows_out = table.row_count(),
        key = key.unwrap_or("-"),
        deduplicate,
        "Cleaned rows"
    );
    table
}

fn null_literal_to_null(value: Value) -> Value {
    if value.is_null_literal() {
        Value::Null
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> Table {
        Table::from_rows(
            ["index", "name", "code"],
            vec![
                vec![Value::text("0"), Value::text("a"), Value::text("GB")],
                vec![Value::text("0"), Value::text("a"), Value::text("GB")],
                vec![Value::text("1"), Value::text("NULL"), Value::text("DE")],
                vec![Value::text("2"), Value::text("null"), Value::text("US")],
                vec![Value::text("3"), Value::text("c"), Value::Null],
            ],
        )
    }

    #[test]
    fn test_null_literal_rows_are_dropped() {
        let table = clean_rows(raw(), Some("index"), true);
        assert_eq!(table.row_count(), 2);
        // Lowercase "null" is ordinary text.
        assert_eq!(table.rows[1].cells[0], Value::text("null"));
    }

    #[test]
    fn test_key_is_promoted() {
        let table = clean_rows(raw(), Some("index"), true);
        assert_eq!(table.columns, vec!["name", "code"]);
        assert_eq!(table.key_name.as_deref(), Some("index"));
        assert_eq!(table.rows[0].key, Some(Value::text("0")));
    }

    #[test]
    fn test_missing_key_column_is_ignored() {
        let table = clean_rows(raw(), Some("Unnamed: 0"), true);
        assert_eq!(table.key_name, None);
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_duplicates_kept_without_dedupe() {
        let table = clean_rows(raw(), None, false);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_idempotent() {
        let once = clean_rows(raw(), Some("index"), true);
        let twice = clean_rows(once.clone(), Some("index"), true);
        assert_eq!(once, twice);
    }
}
