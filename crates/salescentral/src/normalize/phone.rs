//! Country-specific phone number checks.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::Value;

/// National and international UK layouts, e.g. `+44(0)20 7946 0018`,
/// `(01632) 960 001`, `07700900077`.
static UK_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:\+44\s?\(0\)\s?\d{2,4}|\(?\d{2,5}\)?)\s?\d{3,4}\s?\d{3,4}$|\d{10,11}|\+44\s?\d{2,5}\s?\d{3,4}\s?\d{3,4})$",
    )
    .unwrap()
});

/// Loose German check: at least six digits or separators, then a digit run.
static DE_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?[\d \-)–+/(]{6,}\)?[ .\-–/]?\d+").unwrap());

/// `(XXX) XXX-XXXX` family. Only the start of the value has to match.
static US_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?\d{3}\)?-? *\d{3}-? *-?\d{4}").unwrap());

/// Countries whose phone numbers are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneRegion {
    Gb,
    De,
    Us,
}

impl PhoneRegion {
    /// Two-letter country code.
    pub fn code(&self) -> &'static str {
        match self {
            PhoneRegion::Gb => "GB",
            PhoneRegion::De => "DE",
            PhoneRegion::Us => "US",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            PhoneRegion::Gb => &UK_PHONE,
            PhoneRegion::De => &DE_PHONE,
            PhoneRegion::Us => &US_PHONE,
        }
    }

    /// Returns true if `phone` is in an accepted layout for this country.
    pub fn is_valid_phone(&self, phone: &str) -> bool {
        self.pattern().is_match(phone)
    }
}

impl FromStr for PhoneRegion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GB" => Ok(PhoneRegion::Gb),
            "DE" => Ok(PhoneRegion::De),
            "US" => Ok(PhoneRegion::Us),
            _ => Err(()),
        }
    }
}

/// Null a phone number that does not fit its row's country.
///
/// Rows from other countries, or without a country code, are not checked.
pub fn validate_phone(country_code: &Value, phone: Value) -> Value {
    let Some(region) = country_code.as_str().and_then(|c| c.parse::<PhoneRegion>().ok()) else {
        return phone;
    };

    let valid = match &phone {
        Value::Null => false,
        Value::Text(s) => region.is_valid_phone(s),
        other => region.is_valid_phone(&other.to_string()),
    };

    if valid { phone } else { Value::Null }
}
