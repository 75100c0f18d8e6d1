//! Common test utilities for kotlin-buildgen
//!
//! Kotlin source fixtures, a temporary repository builder and assertions
//! over run results.

#![allow(dead_code)]

mod assertions;
mod builders;
mod fixtures;

// Re-export all utilities
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
