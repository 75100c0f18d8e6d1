//! In-memory rule index
//!
//! Filled during the indexing pass through [`RuleIndexBuilder`], then frozen
//! into a [`RuleIndex`] that resolution only reads.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::features::resolution::domain::{FindResult, ImportSpec};
use crate::features::resolution::ports::ProviderIndex;
use crate::shared::models::Label;

/// Collects what each generated rule provides
#[derive(Debug, Default)]
pub struct RuleIndexBuilder {
    providers: FxHashMap<ImportSpec, Vec<FindResult>>,
    rule_count: usize,
}

impl RuleIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `label` provides every spec in `provides`.
    pub fn add_rule(&mut self, label: &Label, provides: impl IntoIterator<Item = ImportSpec>) {
        self.rule_count += 1;
        for spec in provides {
            trace!(%label, %spec, "provides");
            let results = self.providers.entry(spec).or_default();
            if !results.iter().any(|r| &r.label == label) {
                results.push(FindResult::new(label.clone()));
            }
        }
    }

    pub fn finish(self) -> RuleIndex {
        RuleIndex {
            providers: self.providers,
            rule_count: self.rule_count,
        }
    }
}

/// Read-only provider index
#[derive(Debug, Default)]
pub struct RuleIndex {
    providers: FxHashMap<ImportSpec, Vec<FindResult>>,
    rule_count: usize,
}

impl RuleIndex {
    /// Number of rules indexed, including those providing nothing
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Number of distinct import specs provided
    pub fn spec_count(&self) -> usize {
        self.providers.len()
    }
}

impl ProviderIndex for RuleIndex {
    fn find_providers(&self, spec: &ImportSpec) -> Vec<FindResult> {
        self.providers.get(spec).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_providers() {
        let a = Label::new("", "a", "a");
        let b = Label::new("", "b", "b");
        let mut builder = RuleIndexBuilder::new();
        builder.add_rule(&a, vec![ImportSpec::new("kotlin", "com.x")]);
        builder.add_rule(
            &b,
            vec![
                ImportSpec::new("kotlin", "com.x"),
                ImportSpec::new("kotlin", "com.y"),
            ],
        );
        builder.add_rule(&Label::new("", "c", "c_bin"), Vec::new());
        let index = builder.finish();

        assert_eq!(index.rule_count(), 3);
        assert_eq!(index.spec_count(), 2);
        assert_eq!(
            index.find_providers(&ImportSpec::new("kotlin", "com.x")),
            vec![FindResult::new(a), FindResult::new(b.clone())]
        );
        assert_eq!(
            index.find_providers(&ImportSpec::new("kotlin", "com.y")),
            vec![FindResult::new(b)]
        );
        assert!(index
            .find_providers(&ImportSpec::new("java", "com.y"))
            .is_empty());
    }

    #[test]
    fn test_same_rule_declared_twice_is_one_provider() {
        let a = Label::new("", "a", "a");
        let mut builder = RuleIndexBuilder::new();
        builder.add_rule(&a, vec![ImportSpec::new("kotlin", "com.x")]);
        builder.add_rule(&a, vec![ImportSpec::new("kotlin", "com.x")]);
        let index = builder.finish();
        assert_eq!(
            index.find_providers(&ImportSpec::new("kotlin", "com.x")).len(),
            1
        );
    }
}
