//! Card details published as a PDF table.
//!
//! The PDF holds one table spread over many pages, with a repeated header
//! row. Each text line is a row: card number and expiry date are single
//! tokens, the provider may contain spaces, and the payment date is either
//! a single token or one of the spaced layouts (`2005 July 01`,
//! `December 2002 14`).

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{Result, SalesCentralError};
use crate::table::{Table, Value};

/// Columns of the card table, in order.
pub const CARD_COLUMNS: [&str; 4] = [
    "card_number",
    "expiry_date",
    "card_provider",
    "date_payment_confirmed",
];

static CARD_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\S+)\s+(\S+)\s+(.+?)\s+(\d{4}-\d{2}-\d{2}|\d{4}/\d{2}/\d{2}|\d{4} [A-Za-z]+ \d{1,2}|[A-Za-z]+ \d{4} \d{1,2}|\S+)$",
    )
    .unwrap()
});

/// Extract the card table from PDF bytes.
pub fn parse_card_pdf(bytes: &[u8]) -> Result<Table> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| SalesCentralError::Pdf(e.to_string()))?;
    let table = card_table_from_text(&text);
    if table.is_empty() {
        return Err(SalesCentralError::EmptyData(
            "no card rows found in PDF".to_string(),
        ));
    }
    Ok(table)
}

/// Split extracted PDF text into card rows. Header rows and lines that do
/// not hold four fields are skipped.
pub fn card_table_from_text(text: &str) -> Table {
    let mut skipped = 0usize;
    let rows: Vec<Vec<Value>> = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with(CARD_COLUMNS[0]))
        .filter_map(|line| {
            let Some(caps) = CARD_ROW.captures(&line) else {
                skipped += 1;
                return None;
            };
            Some(
                (1..=CARD_COLUMNS.len())
                    .map(|i| Value::text(&caps[i]))
                    .collect(),
            )
        })
        .collect();

    debug!(rows = rows.len(), skipped, "Read card rows from PDF text");
    Table::from_rows(CARD_COLUMNS, rows)
}
