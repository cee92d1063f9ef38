//! Field normalizers.
//!
//! Each normalizer maps one raw cell to one cleaned cell. None of them fail:
//! a value that cannot be read becomes [`Value::Null`](crate::table::Value)
//! and the row is later removed by the null-drop step.

mod category;
mod date;
mod numeric;
mod phone;
mod text;
mod weight;

pub use category::{WeightClass, weight_class_of};
pub use date::{parse_mixed_date, parse_month_year, to_date, to_month_year};
pub use numeric::{
    POUND_SIGN, coordinate_to_number, parse_price, parse_staff_numbers, price_to_number, round_to,
    staff_numbers_to_integer, to_integer,
};
pub use phone::{PhoneRegion, validate_phone};
pub use text::{
    STILL_AVAILABLE_SENTINEL, STORE_COUNTRY_CODES, UNITED_KINGDOM, availability_flag,
    correct_country_code, fix_continent, normalize_product_name, store_country_code,
    strip_leading_question_marks,
};
pub use weight::{parse_weight_kg, weight_to_kg};
