//! User records from the legacy users table.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::normalize::{correct_country_code, to_date, validate_phone};
use crate::table::{Table, Value};
use crate::validation::{CountryCodeLengthFilter, UuidFilter, apply_filter};

use super::DataCleaner;

const KEY: &str = "index";
const DATE_COLUMNS: &[&str] = &["date_of_birth", "join_date"];
const TEXT_COLUMNS: &[&str] = &["country_code", "phone_number", "email_address", "address"];

impl DataCleaner {
    /// Clean the users table.
    ///
    /// Dates must parse, UK rows get country code `GB`, phone numbers must
    /// fit their country, `user_uuid` must be canonical and the country code
    /// two characters long.
    pub fn clean_user_data(&self, table: Table) -> Result<Table> {
        let dataset = Dataset::Users.name();
        let table = self.row_clean(Dataset::Users, table, Some(KEY));

        for column in DATE_COLUMNS {
            table.require_column(dataset, column)?;
        }
        let country = table.require_column(dataset, "country")?;
        let country_code = table.require_column(dataset, "country_code")?;
        table.require_column(dataset, "phone_number")?;

        let table = DATE_COLUMNS
            .iter()
            .fold(table, |t, column| t.map_column(column, to_date));

        let table = table
            .map_column_with("country_code", |row, code| {
                correct_country_code(&row.cells[country], code)
            })
            .map_column_with("phone_number", |row, phone| {
                validate_phone(&row.cells[country_code], phone)
            });

        let table = TEXT_COLUMNS
            .iter()
            .fold(table, |t, column| t.map_column(column, Value::into_text))
            .drop_nulls();

        let table = apply_filter(table, dataset, &UuidFilter::strict("user_uuid"))?;
        apply_filter(table, dataset, &CountryCodeLengthFilter::new("country_code"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(rows: Vec<[&str; 8]>) -> Table {
        Table::from_rows(
            [
                "index",
                "first_name",
                "country",
                "country_code",
                "phone_number",
                "date_of_birth",
                "join_date",
                "user_uuid",
            ],
            rows.into_iter()
                .map(|r| r.iter().map(|s| Value::text(*s)).collect::<Vec<_>>()),
        )
    }

    const UUID: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[test]
    fn test_uk_rows_are_corrected_to_gb() {
        let table = users(vec![[
            "0",
            "Ann",
            "United Kingdom",
            "GGB",
            "07700900077",
            "1968-10-16",
            "2005-01-27",
            UUID,
        ]]);
        let cleaned = DataCleaner::new().clean_user_data(table).unwrap();
        assert_eq!(cleaned.row_count(), 1);
        assert_eq!(cleaned.get(0, "country_code"), Some(&Value::text("GB")));
    }

    #[test]
    fn test_bad_dates_and_phones_drop_rows() {
        let table = users(vec![
            ["0", "Ann", "United States", "US", "(123) 456-7890", "1968-10-16", "2005-01-27", UUID],
            ["1", "Bob", "United States", "US", "12345", "1968-10-16", "2005-01-27", UUID],
            ["2", "Cat", "United States", "US", "(123) 456-7890", "GFJQ2AAEQ8", "2005-01-27", UUID],
        ]);
        let cleaned = DataCleaner::new().clean_user_data(table).unwrap();
        assert_eq!(cleaned.row_count(), 1);
        assert_eq!(cleaned.rows[0].key, Some(Value::text("0")));
    }

    #[test]
    fn test_invalid_uuid_and_long_country_code_are_filtered() {
        let table = users(vec![
            ["0", "Ann", "Germany", "DE", "030 1234567", "1968-10-16", "2005-01-27", "not-a-uuid"],
            ["1", "Bob", "France", "FRA", "01 23", "1968-10-16", "2005-01-27", UUID],
        ]);
        let cleaned = DataCleaner::new().clean_user_data(table).unwrap();
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_missing_column_is_structural() {
        let table = Table::from_rows(
            ["index", "country"],
            vec![vec![Value::text("0"), Value::text("x")]],
        );
        let err = DataCleaner::new().clean_user_data(table).unwrap_err();
        assert!(err.to_string().contains("date_of_birth"));
    }
}
