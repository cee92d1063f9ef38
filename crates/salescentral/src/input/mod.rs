//! Input parsing for delimited, JSON and PDF exports.

mod json;
mod parser;
mod pdf;
mod source;

pub use json::{json_to_table, parse_json_table};
pub use parser::{Parser, ParserConfig};
pub use pdf::{CARD_COLUMNS, card_table_from_text, parse_card_pdf};
pub(crate) use parser::content_hash;
pub use source::SourceMetadata;
