//! Parser implementations

pub mod kotlin_parser;

pub use kotlin_parser::KotlinParser;
