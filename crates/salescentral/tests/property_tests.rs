//! Property-based tests for the cleaning pipeline.
//!
//! These tests use proptest to generate raw tables and free-text cells and
//! verify that the cleaners keep their invariants for any input:
//!
//! 1. **No panics**: parsers never crash on any input
//! 2. **No nulls**: cleaned tables hold no null cells
//! 3. **Idempotence**: row cleaning its own output changes nothing
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p salescentral --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p salescentral --test property_tests
//! ```

use proptest::prelude::*;

use salescentral::clean::clean_rows;
use salescentral::input::parse_json_table;
use salescentral::normalize::{
    WeightClass, parse_mixed_date, parse_month_year, parse_price, parse_staff_numbers,
    parse_weight_kg,
};
use salescentral::validation::is_valid_uuid;
use salescentral::{DataCleaner, Dataset, Parser, Table, Value};

// =============================================================================
// Test Strategies
// =============================================================================

/// Generate completely random strings (edge cases)
fn random_text() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 0..120)
        .prop_filter_map("valid UTF-8", |bytes| String::from_utf8(bytes).ok())
}

/// Generate strings that look like product weights
fn weight_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,4}(\\.[0-9]{1,3})?(kg|g|ml|oz)",
        "[0-9]{1,2} x [0-9]{1,4}(g|ml|kg)",
        "[0-9]{1,4}g \\.",
        "[a-z ]{0,12}",
        "[0-9]{300,400}(g|kg)?",
        "[0-9]{1,3} x [0-9]{300,400}(g|ml)",
    ]
}

/// A cell as it appears in a raw export: text, the NULL literal or empty.
fn raw_cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => "[a-zA-Z0-9]{1,6}".prop_map(Value::text),
        1 => Just(Value::text("NULL")),
        1 => Just(Value::Null),
        1 => (0i64..5).prop_map(Value::Integer),
    ]
}

fn raw_table(columns: usize) -> impl Strategy<Value = Table> {
    prop::collection::vec(prop::collection::vec(raw_cell(), columns), 0..25).prop_map(
        move |rows| {
            let names: Vec<String> = (0..columns).map(|i| format!("c{}", i)).collect();
            Table::from_rows(names, rows)
        },
    )
}

/// A user cell drawn from a pool of good and bad values for its column.
fn user_row() -> impl Strategy<Value = Vec<Value>> {
    (
        0u32..40,
        prop::sample::select(vec!["United Kingdom", "Germany", "United States", "France"]),
        prop::sample::select(vec!["GB", "GGB", "DE", "US", "FRA", "NULL"]),
        prop::sample::select(vec![
            "(123) 456-7890",
            "12345",
            "07700900077",
            "+49(0) 047905356",
            "",
        ]),
        prop::sample::select(vec!["1968-10-16", "2001 May 21", "GFJQ2AAEQ8", "NULL"]),
        prop::sample::select(vec![
            "93caf182-e4e9-4c6e-bebb-60a1a9dcf9b8",
            "93CAF182-E4E9-4C6E-BEBB-60A1A9DCF9B8",
            "not-a-uuid",
        ]),
    )
        .prop_map(|(index, country, code, phone, date, uuid)| {
            vec![
                Value::text(index.to_string()),
                Value::text(country),
                Value::text(code),
                Value::from(Some(phone).filter(|p| !p.is_empty())),
                Value::text(date),
                Value::text(date),
                Value::text(uuid),
            ]
        })
}

fn users_table() -> impl Strategy<Value = Table> {
    prop::collection::vec(user_row(), 0..20).prop_map(|rows| {
        Table::from_rows(
            [
                "index",
                "country",
                "country_code",
                "phone_number",
                "date_of_birth",
                "join_date",
                "user_uuid",
            ],
            rows,
        )
    })
}

fn store_row() -> impl Strategy<Value = Vec<Value>> {
    (
        0u32..40,
        prop::sample::select(vec!["GB", "DE", "US", "FR", "NULL"]),
        prop::sample::select(vec!["Europe", "eeEurope", "eeAmerica", "Asia"]),
        prop::sample::select(vec!["34", "J78", "none", ""]),
        prop::sample::select(vec!["51.62907", "-0.7487262", "north", ""]),
        prop::sample::select(vec!["1996-10-25", "October 2012 08", "NULL"]),
    )
        .prop_map(|(index, code, continent, staff, coordinate, opened)| {
            let optional = |s: &str| Value::from(Some(s).filter(|s| !s.is_empty()));
            vec![
                Value::text(index.to_string()),
                Value::text(code),
                Value::text(continent),
                optional(staff),
                optional(coordinate),
                optional(coordinate),
                Value::text(opened),
            ]
        })
}

fn stores_table() -> impl Strategy<Value = Table> {
    prop::collection::vec(store_row(), 0..20).prop_map(|rows| {
        Table::from_rows(
            [
                "index",
                "country_code",
                "continent",
                "staff_numbers",
                "latitude",
                "longitude",
                "opening_date",
            ],
            rows,
        )
    })
}

// =============================================================================
// Parser Properties
// =============================================================================

mod parser_tests {
    use super::*;

    proptest! {
        /// Field parsers never panic on any input.
        #[test]
        fn field_parsers_never_panic(text in random_text()) {
            let _ = parse_weight_kg(&text);
            let _ = parse_mixed_date(&text);
            let _ = parse_month_year(&text);
            let _ = parse_price(&text);
            let _ = parse_staff_numbers(&text);
            let _ = is_valid_uuid(&text);
        }

        /// Table readers return an error, not a panic, on garbage.
        #[test]
        fn table_readers_never_panic(text in random_text()) {
            let _ = Parser::new().parse_bytes(text.as_bytes());
            let _ = parse_json_table(text.as_bytes());
        }

        /// Parsed weights are finite and non-negative.
        #[test]
        fn weights_are_finite(text in weight_like()) {
            if let Some(kg) = parse_weight_kg(&text) {
                prop_assert!(kg.is_finite());
                prop_assert!(kg >= 0.0);
            }
        }

        /// Weight classes are ordered by weight.
        #[test]
        fn weight_class_is_monotonic(a in 0.0f64..500.0, b in 0.0f64..500.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let rank = |kg| match WeightClass::from_kg(Some(kg)) {
                WeightClass::Light => 0,
                WeightClass::MidSized => 1,
                WeightClass::Heavy => 2,
                WeightClass::TruckRequired => 3,
                WeightClass::Unknown => 4,
            };
            prop_assert!(rank(lo) <= rank(hi));
        }
    }
}

// =============================================================================
// Row Cleaning Properties
// =============================================================================

mod row_cleaning_tests {
    use super::*;

    proptest! {
        /// Row cleaning its own output is a no-op.
        #[test]
        fn row_cleaning_is_idempotent(table in raw_table(4), dedupe in any::<bool>()) {
            let once = clean_rows(table, Some("c0"), dedupe);
            let twice = clean_rows(once.clone(), Some("c0"), dedupe);
            prop_assert_eq!(once, twice);
        }

        /// Row cleaning leaves no nulls or NULL literals.
        #[test]
        fn row_cleaning_removes_nulls(table in raw_table(3)) {
            let cleaned = clean_rows(table, None, true);
            prop_assert!(!cleaned.has_nulls());
            for row in &cleaned.rows {
                prop_assert!(row.cells.iter().all(|c| !c.is_null_literal()));
            }
        }

        /// Row cleaning never adds rows.
        #[test]
        fn row_cleaning_never_grows(table in raw_table(3)) {
            let rows_in = table.row_count();
            let cleaned = clean_rows(table, None, false);
            prop_assert!(cleaned.row_count() <= rows_in);
        }
    }
}

// =============================================================================
// Dataset Cleaner Properties
// =============================================================================

mod cleaner_tests {
    use super::*;

    proptest! {
        /// Cleaned users hold no nulls and only two-letter country codes.
        #[test]
        fn users_have_no_nulls(table in users_table()) {
            let cleaned = DataCleaner::new().clean(Dataset::Users, table).unwrap();
            prop_assert!(!cleaned.has_nulls());
            for code in cleaned.column_values("country_code").unwrap() {
                prop_assert_eq!(code.as_str().map(str::len), Some(2));
            }
        }

        /// Stores other than the web store hold no nulls.
        #[test]
        fn stores_have_no_nulls_outside_web_store(table in stores_table()) {
            let cleaned = DataCleaner::new().clean(Dataset::Stores, table).unwrap();
            let with_nulls = cleaned.rows.iter().filter(|r| r.has_null()).count();
            prop_assert!(with_nulls <= 1);
            for code in cleaned.column_values("country_code").unwrap() {
                prop_assert!(
                    ["GB", "DE", "US"].contains(&code.as_str().unwrap_or_default())
                );
            }
        }

        /// Cleaning is deterministic.
        #[test]
        fn cleaning_is_deterministic(table in users_table()) {
            let cleaner = DataCleaner::new();
            let first = cleaner.clean(Dataset::Users, table.clone()).unwrap();
            let second = cleaner.clean(Dataset::Users, table).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
