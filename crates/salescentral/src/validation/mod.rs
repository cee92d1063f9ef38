//! Validators and record filters.

mod filters;
mod identifiers;

pub use filters::{
    CountryCodeLengthFilter, RecordFilter, TimePeriod, TimePeriodFilter, UuidFilter, apply_filter,
};
pub use identifiers::{is_valid_uuid, matches_uuid_shape};
