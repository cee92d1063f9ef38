//! Text corrections: country codes, continents, names and card numbers.

use crate::table::Value;

/// Country name whose rows carry a mistyped country code.
pub const UNITED_KINGDOM: &str = "United Kingdom";

/// Country codes the store estate operates in.
pub const STORE_COUNTRY_CODES: &[&str] = &["DE", "US", "GB"];

/// Sentinel written by the product export for items still on sale. The
/// misspelling is the export's own.
pub const STILL_AVAILABLE_SENTINEL: &str = "Still_avaliable";

/// Known continent misspellings and their corrections.
const CONTINENT_FIXES: &[(&str, &str)] = &[("eeEurope", "Europe"), ("eeAmerica", "America")];

/// Force `GB` for rows whose country is the United Kingdom.
pub fn correct_country_code(country: &Value, country_code: Value) -> Value {
    if country.as_str() == Some(UNITED_KINGDOM) {
        Value::text("GB")
    } else {
        country_code
    }
}

/// Null any store country code outside the operating countries.
pub fn store_country_code(value: Value) -> Value {
    match value.as_str() {
        Some(code) if STORE_COUNTRY_CODES.contains(&code) => value,
        _ => Value::Null,
    }
}

/// Correct known continent misspellings. Other values pass through.
pub fn fix_continent(value: Value) -> Value {
    let fixed = value.as_str().and_then(|s| {
        CONTINENT_FIXES
            .iter()
            .find(|(wrong, _)| *wrong == s)
            .map(|(_, right)| *right)
    });
    match fixed {
        Some(right) => Value::text(right),
        None => value,
    }
}

/// Trim and lowercase a product name.
pub fn normalize_product_name(value: Value) -> Value {
    match value {
        Value::Text(s) => Value::Text(s.trim().to_lowercase()),
        other => other,
    }
}

/// Remove leading `?` characters that corrupt some card numbers.
/// Numeric card numbers are rendered as text first.
pub fn strip_leading_question_marks(value: Value) -> Value {
    match value.into_text() {
        Value::Text(s) => Value::text(s.trim_start_matches('?')),
        other => other,
    }
}

/// True only for the still-available sentinel; every other value is false.
pub fn availability_flag(value: Value) -> Value {
    Value::Bool(value.as_str() == Some(STILL_AVAILABLE_SENTINEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uk_country_code_is_corrected() {
        let uk = Value::text("United Kingdom");
        assert_eq!(correct_country_code(&uk, Value::text("GGB")), Value::text("GB"));

        let de = Value::text("Germany");
        assert_eq!(correct_country_code(&de, Value::text("DE")), Value::text("DE"));
    }

    #[test]
    fn test_store_country_codes() {
        assert_eq!(store_country_code(Value::text("GB")), Value::text("GB"));
        assert_eq!(store_country_code(Value::text("FR")), Value::Null);
        assert_eq!(store_country_code(Value::text("gb")), Value::Null);
    }

    #[test]
    fn test_fix_continent() {
        assert_eq!(fix_continent(Value::text("eeEurope")), Value::text("Europe"));
        assert_eq!(fix_continent(Value::text("eeAmerica")), Value::text("America"));
        assert_eq!(fix_continent(Value::text("Asia")), Value::text("Asia"));
    }

    #[test]
    fn test_product_name() {
        assert_eq!(
            normalize_product_name(Value::text("  FurReal Dazzlin' Dimples  ")),
            Value::text("furreal dazzlin' dimples")
        );
    }

    #[test]
    fn test_card_number_question_marks() {
        assert_eq!(
            strip_leading_question_marks(Value::text("???4971858637664481")),
            Value::text("4971858637664481")
        );
        assert_eq!(
            strip_leading_question_marks(Value::text("4971?")),
            Value::text("4971?")
        );
        assert_eq!(
            strip_leading_question_marks(Value::Integer(30060773296197)),
            Value::text("30060773296197")
        );
        assert_eq!(strip_leading_question_marks(Value::Null), Value::Null);
    }

    #[test]
    fn test_availability_flag() {
        assert_eq!(availability_flag(Value::text("Still_avaliable")), Value::Bool(true));
        assert_eq!(availability_flag(Value::text("Removed")), Value::Bool(false));
        assert_eq!(availability_flag(Value::text("Still_available")), Value::Bool(false));
    }
}
