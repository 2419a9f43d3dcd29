mod parse;
mod write;

pub use parse::{decode_entities, parse_fragment, ParseError};
pub use write::{escape_attr, escape_text, to_html};
