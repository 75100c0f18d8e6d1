//! Parser port (interface)

use crate::features::parsing::domain::{ParseError, ParseResult};

/// Extracts package, import and entry-point facts from Kotlin source.
///
/// Errors are collected rather than returned: a file with syntax errors still
/// yields whatever could be read from it.
pub trait Parser: Send + Sync {
    /// Parse `source`, which was read from `file_path`.
    fn parse(&self, file_path: &str, source: &str) -> (ParseResult, Vec<ParseError>);

    /// Check if this parser handles a file extension (without the dot)
    fn supports_extension(&self, ext: &str) -> bool;
}
