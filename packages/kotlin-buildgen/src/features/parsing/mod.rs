//! Parsing Feature
//!
//! Reads package, import and entry-point facts out of Kotlin sources.
//!
//! ## Structure
//! - `domain/` - ParseResult, ImportStatement, ParseError
//! - `ports/` - Parser trait
//! - `application/` - source collection and the parallel parse of a directory
//! - `infrastructure/` - tree-sitter backed KotlinParser

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::{collect_source_files, parse_files, FileParse};
pub use domain::{ImportStatement, ParseError, ParseResult};
pub use infrastructure::KotlinParser;
pub use ports::Parser;
