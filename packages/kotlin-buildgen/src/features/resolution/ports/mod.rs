//! Resolution ports (interfaces)
//!
//! The engine consults three collaborators: the rule index, the override
//! directives and the artifact manager. Each is a narrow lookup.

mod artifact_resolver;
mod provider_index;

pub use artifact_resolver::{ArtifactError, ArtifactResolver};
pub use provider_index::{OverrideLookup, ProviderIndex};
