//! Target classification

mod classify;

pub use classify::{classify_files, guess_class_name, ClassifiedTargets};
