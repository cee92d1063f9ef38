//! Product catalogue.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::normalize::{
    availability_flag, normalize_product_name, price_to_number, to_date, weight_class_of,
    weight_to_kg,
};
use crate::table::Table;
use crate::validation::{UuidFilter, apply_filter};

use super::DataCleaner;

/// Row-number column written by the product export.
const KEY: &str = "Unnamed: 0";

const RENAMES: &[(&str, &str)] = &[
    ("product_price", "product_price_pounds"),
    ("removed", "still_available"),
    ("EAN", "ean"),
];

impl DataCleaner {
    /// Replace the free-text `weight` column with `weight_kg`.
    pub fn convert_product_weights(&self, table: Table) -> Result<Table> {
        let weight = table.require_column(Dataset::Products.name(), "weight")?;
        Ok(table
            .with_column("weight_kg", |row| weight_to_kg(row.cells[weight].clone()))
            .drop_columns(&["weight"]))
    }

    /// Clean the product table. Expects [`convert_product_weights`] to have
    /// run first.
    ///
    /// [`convert_product_weights`]: DataCleaner::convert_product_weights
    pub fn clean_products_data(&self, table: Table) -> Result<Table> {
        let dataset = Dataset::Products.name();
        let table = self.row_clean(Dataset::Products, table, Some(KEY));

        let table = table
            .map_column("product_name", normalize_product_name)
            .map_column("product_price", price_to_number);
        let table = RENAMES
            .iter()
            .fold(table, |t, (from, to)| t.rename_column(from, to));

        table.require_column(dataset, "still_available")?;
        table.require_column(dataset, "date_added")?;
        let weight_kg = table.require_column(dataset, "weight_kg")?;

        let table = table
            .map_column("still_available", availability_flag)
            .map_column("date_added", to_date)
            .with_column("weight_class", |row| weight_class_of(&row.cells[weight_kg]));

        let table = apply_filter(table, dataset, &UuidFilter::shape("uuid"))?;
        Ok(table.drop_nulls())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn products() -> Table {
        Table::from_rows(
            [
                "Unnamed: 0",
                "product_name",
                "product_price",
                "weight",
                "EAN",
                "date_added",
                "uuid",
                "removed",
                "product_code",
            ],
            vec![
                vec![
                    "0",
                    "  FurReal Dazzlin' Dimples  ",
                    "£39.99",
                    "1.6kg",
                    "7425710935115",
                    "2005-12-02",
                    "83dc0a69-f96f-4c34-bcb7-928acae19a94",
                    "Still_avaliable",
                    "R7-3126933h",
                ],
                vec![
                    "1",
                    "Tiffany Table",
                    "£135.00",
                    "5 x 145g",
                    "2854924051183",
                    "2006-09-26",
                    "9d4b2a9c-0d80-4a4c-87b6-1e7cde13b3fe",
                    "Removed",
                    "C2-7287916l",
                ],
                vec![
                    "2",
                    "Bulk Sand",
                    "£12.00",
                    "assorted",
                    "123",
                    "2006-09-26",
                    "1b2b3b4b-0000-4000-8000-000000000000",
                    "Removed",
                    "Z1-0000000a",
                ],
                vec![
                    "3",
                    "Ghost",
                    "£1.00",
                    "1kg",
                    "456",
                    "2006-09-26",
                    "VLPCU81M30",
                    "Removed",
                    "Z2-0000000b",
                ],
            ]
            .into_iter()
            .map(|r| r.into_iter().map(Value::text).collect::<Vec<_>>()),
        )
    }

    fn cleaned() -> Table {
        let cleaner = DataCleaner::new();
        let converted = cleaner.convert_product_weights(products()).unwrap();
        cleaner.clean_products_data(converted).unwrap()
    }

    #[test]
    fn test_weight_column_is_replaced() {
        let converted = DataCleaner::new().convert_product_weights(products()).unwrap();
        assert!(!converted.has_column("weight"));
        assert_eq!(converted.get(1, "weight_kg"), Some(&Value::Number(0.725)));
        assert_eq!(converted.get(2, "weight_kg"), Some(&Value::Null));
    }

    #[test]
    fn test_products_are_cleaned() {
        let table = cleaned();
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.columns,
            vec![
                "product_name",
                "product_price_pounds",
                "ean",
                "date_added",
                "uuid",
                "still_available",
                "product_code",
                "weight_kg",
                "weight_class",
            ]
        );
        assert_eq!(table.get(0, "product_name"), Some(&Value::text("furreal dazzlin' dimples")));
        assert_eq!(table.get(0, "product_price_pounds"), Some(&Value::Number(39.99)));
        assert_eq!(table.get(0, "still_available"), Some(&Value::Bool(true)));
        assert_eq!(table.get(1, "still_available"), Some(&Value::Bool(false)));
        assert_eq!(table.get(0, "weight_class"), Some(&Value::text("Light")));
        assert!(!table.has_nulls());
    }

    #[test]
    fn test_missing_weight_column() {
        let table = Table::from_rows(["uuid"], Vec::<Vec<Value>>::new());
        assert!(DataCleaner::new().convert_product_weights(table).is_err());
    }
}
