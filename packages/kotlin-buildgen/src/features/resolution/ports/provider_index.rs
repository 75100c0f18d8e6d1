//! Index and override ports

use crate::config::KotlinConfig;
use crate::features::resolution::domain::{FindResult, ImportSpec};
use crate::shared::models::Label;

/// Rules that declared they provide an import spec.
///
/// Implementations are read-only once resolution starts.
pub trait ProviderIndex: Send + Sync {
    /// Every rule providing exactly `spec`, in declaration order
    fn find_providers(&self, spec: &ImportSpec) -> Vec<FindResult>;
}

/// User-supplied forced mappings from import to label
pub trait OverrideLookup {
    fn find_rule_with_override(&self, spec: &ImportSpec) -> Option<Label>;
}

impl OverrideLookup for KotlinConfig {
    fn find_rule_with_override(&self, spec: &ImportSpec) -> Option<Label> {
        self.find_override(&spec.imp, &spec.lang).cloned()
    }
}
