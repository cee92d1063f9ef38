//! Fuzz target for date parsing.
//!
//! Mixed-layout dates and card expiries must never panic, and an accepted
//! expiry is always `MM/YY`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use salescentral::normalize::{parse_mixed_date, parse_month_year};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_mixed_date(text);
        if let Some(expiry) = parse_month_year(text) {
            assert_eq!(expiry.len(), 5);
        }
    }
});
