//! Fuzz target for the export readers.
//!
//! The CSV parser and JSON table reader must reject malformed input with
//! an error, never a panic, and the card cleaner must accept whatever the
//! parser produces.

#![no_main]

use libfuzzer_sys::fuzz_target;
use salescentral::input::parse_json_table;
use salescentral::{DataCleaner, Dataset, Parser};

fuzz_target!(|data: &[u8]| {
    // Bound input size to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(table) = Parser::new().parse_bytes(data) {
        let _ = DataCleaner::new().clean(Dataset::Cards, table);
    }
    let _ = parse_json_table(data);
});
