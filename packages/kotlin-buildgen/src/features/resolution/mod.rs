//! Resolution Feature
//!
//! Maps import identifiers to dependency labels.
//!
//! ## Structure
//! - `domain/` - ImportSpec, FindResult, ResolutionOutcome, LabelSet
//! - `ports/` - ProviderIndex, OverrideLookup, ArtifactResolver traits
//! - `application/` - ImportResolver, the indexing pass
//! - `infrastructure/` - RuleIndex, MavenInstallResolver, standard library predicates

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::{declare_provides, index_rules, ImportResolver, ResolvedDeps};
pub use domain::{FindResult, ImportSpec, LabelSet, ResolutionOutcome, UnresolvedImport};
pub use infrastructure::{
    is_java_stdlib, is_native_import, MavenInstallResolver, RuleIndex, RuleIndexBuilder,
};
pub use ports::{ArtifactError, ArtifactResolver, OverrideLookup, ProviderIndex};
