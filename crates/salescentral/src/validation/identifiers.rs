//! Identifier checks.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::{Uuid, Variant};

/// Canonical 8-4-4-4-12 hex layout, either case.
static UUID_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    )
    .unwrap()
});

/// Strict check used for user and order identifiers.
///
/// The string must parse as an RFC 4122 UUID and be identical to its own
/// canonical rendering: lowercase, hyphenated, no braces or `urn:` prefix.
pub fn is_valid_uuid(candidate: &str) -> bool {
    match Uuid::parse_str(candidate) {
        Ok(parsed) => {
            parsed.get_variant() == Variant::RFC4122
                && parsed.hyphenated().to_string() == candidate
        }
        Err(_) => false,
    }
}

/// Loose check used for product identifiers: layout only.
pub fn matches_uuid_shape(candidate: &str) -> bool {
    UUID_SHAPE.is_match(candidate)
}
