//! Free-text product weight parsing.
//!
//! Weights arrive as strings like `"5 x 145g"`, `"250ml"` or `"3kg"`. The
//! parser is lossy: anything it cannot read becomes null.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::Value;

use super::numeric::round_to;

/// First decimal number in a string.
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// A gram or millilitre unit directly after a number. `kg` does not match.
static GRAM_OR_ML: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d\s*(?:g|ml)\b").unwrap());

/// Marker separating pack quantity from unit weight.
const MULTIPLIER: char = 'x';

fn first_number(text: &str) -> Option<f64> {
    NUMBER.find(text)?.as_str().parse().ok()
}

/// Parse a weight string into kilograms, rounded to 5 decimal places.
///
/// Multi-packs multiply quantity by unit weight. Grams and millilitres are
/// divided by 1000 (1 ml taken as 1 g); a `kg` multi-pack is not.
pub fn parse_weight_kg(text: &str) -> Option<f64> {
    let total = if text.contains(MULTIPLIER) {
        let mut parts = text.split(MULTIPLIER);
        let quantity = first_number(parts.next()?)?;
        let unit_weight = first_number(parts.next()?)?;
        quantity * unit_weight
    } else {
        first_number(text)?
    };

    let kg = if GRAM_OR_ML.is_match(text) {
        total / 1000.0
    } else {
        total
    };

    Some(round_to(kg, 5)).filter(|kg| kg.is_finite())
}

/// Resolve a weight cell to `Number` kilograms, or null.
pub fn weight_to_kg(value: Value) -> Value {
    match value {
        Value::Text(ref s) => parse_weight_kg(s).map(Value::Number).unwrap_or_default(),
        _ => Value::Null,
    }
}
