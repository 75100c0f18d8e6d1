//! Targets Feature
//!
//! Groups the parsed files of one directory into library, binary and test
//! targets.
//!
//! ## Structure
//! - `domain/` - KotlinTarget import aggregate and the three target kinds
//! - `application/` - classify_files

pub mod application;
pub mod domain;

// Re-exports
pub use application::{classify_files, ClassifiedTargets};
pub use domain::{AggregatedImport, BinTarget, KotlinTarget, LibTarget, Target, TestTarget};
