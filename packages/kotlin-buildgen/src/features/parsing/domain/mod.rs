//! Domain models for parsing

mod parse_result;

pub use parse_result::{ImportStatement, ParseError, ParseResult};
