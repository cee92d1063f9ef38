//! Card payment details.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::normalize::{strip_leading_question_marks, to_date, to_month_year};
use crate::table::Table;

use super::DataCleaner;

/// Row-number column written by the card export.
const KEY: &str = "Unnamed: 0";

impl DataCleaner {
    /// Clean the card details table.
    pub fn clean_card_data(&self, table: Table) -> Result<Table> {
        let dataset = Dataset::Cards.name();
        let table = self.row_clean(Dataset::Cards, table, Some(KEY));

        for column in ["date_payment_confirmed", "card_number", "expiry_date"] {
            table.require_column(dataset, column)?;
        }

        Ok(table
            .map_column("date_payment_confirmed", to_date)
            .map_column("card_number", strip_leading_question_marks)
            .map_column("expiry_date", to_month_year)
            .drop_nulls())
    }
}
