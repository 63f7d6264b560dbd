//! Markup templates: logos tokenizer, stack parser, deterministic serializer.

pub mod tokenizer;
pub mod parser;
pub mod serialize;

pub use parser::{parse_document, parse_into, MarkupError};
pub use serialize::{inner_markup, to_markup};
