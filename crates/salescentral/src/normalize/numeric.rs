//! Numeric field parsing: prices, staff counts, coordinates and quantities.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::Value;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Currency symbol stripped from prices.
pub const POUND_SIGN: char = '£';

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a price such as `"£39.99"` into pounds, rounded to 2 places.
pub fn parse_price(text: &str) -> Option<f64> {
    let stripped = text.replace(POUND_SIGN, "");
    parse_finite(&stripped).map(|n| round_to(n, 2))
}

/// Resolve a price cell to `Number`, or null.
pub fn price_to_number(value: Value) -> Value {
    match value {
        Value::Text(ref s) => parse_price(s).map(Value::Number).unwrap_or_default(),
        other => other.as_f64().map(|n| Value::Number(round_to(n, 2))).unwrap_or_default(),
    }
}

/// Extract the first run of digits from a noisy string such as `"J78"`.
pub fn parse_staff_numbers(text: &str) -> Option<i64> {
    DIGIT_RUN.find(text)?.as_str().parse().ok()
}

/// Resolve a staff-count cell to a non-negative `Integer`, or null.
pub fn staff_numbers_to_integer(value: Value) -> Value {
    match value {
        Value::Text(ref s) => parse_staff_numbers(s).map(Value::Integer).unwrap_or_default(),
        Value::Integer(i) if i >= 0 => value,
        _ => Value::Null,
    }
}

/// Resolve a latitude/longitude cell to a `Number` rounded to 5 places.
pub fn coordinate_to_number(value: Value) -> Value {
    let parsed = match value {
        Value::Text(ref s) => parse_finite(s),
        ref other => other.as_f64().filter(|n| n.is_finite()),
    };
    parsed.map(|n| Value::Number(round_to(n, 5))).unwrap_or_default()
}

/// Resolve a quantity cell to an `Integer`. Whole decimals such as `"3.0"`
/// are accepted; fractional values become null.
pub fn to_integer(value: Value) -> Value {
    match value {
        Value::Integer(_) => value,
        Value::Number(n) => whole_number(n),
        Value::Text(ref s) => {
            let trimmed = s.trim();
            match trimmed.parse::<i64>() {
                Ok(i) => Value::Integer(i),
                Err(_) => parse_finite(trimmed).map(whole_number).unwrap_or_default(),
            }
        }
        _ => Value::Null,
    }
}

fn whole_number(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Integer(n as i64)
    } else {
        Value::Null
    }
}
