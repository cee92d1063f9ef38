//! Fuzz target for the product weight parser.
//!
//! Checks that weight parsing never panics and only yields finite,
//! non-negative weights.

#![no_main]

use libfuzzer_sys::fuzz_target;
use salescentral::normalize::{parse_weight_kg, weight_class_of};
use salescentral::Value;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Some(kg) = parse_weight_kg(text) {
            assert!(kg.is_finite());
            assert!(kg >= 0.0);
            let _ = weight_class_of(&Value::Number(kg));
        }
    }
});
