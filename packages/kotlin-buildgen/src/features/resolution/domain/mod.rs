//! Domain models for import resolution

mod label_set;
mod types;

pub use label_set::LabelSet;
pub use types::{FindResult, ImportSpec, ResolutionOutcome, UnresolvedImport};
