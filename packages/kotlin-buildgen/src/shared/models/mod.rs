//! Core value types
//!
//! - [`Identifier`]: dotted Kotlin names (`com.example.Foo`)
//! - [`Label`]: Bazel target references (`@maven//:x`, `//pkg:name`)

mod identifier;
mod label;

pub use identifier::{Identifier, IdentifierError, SimpleIdentifier};
pub use label::{Label, LabelError};
