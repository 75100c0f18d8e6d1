//! Build file access

mod build_file;

pub use build_file::{BuildFile, ExistingRule};
