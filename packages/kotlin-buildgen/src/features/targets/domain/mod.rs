//! Target aggregates

mod target;

pub use target::{AggregatedImport, BinTarget, KotlinTarget, LibTarget, Target, TestTarget};
