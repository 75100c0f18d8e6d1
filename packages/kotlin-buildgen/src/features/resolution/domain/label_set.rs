//! Dependency label set of one rule

use std::collections::BTreeSet;

use crate::shared::models::Label;

/// Sorted, deduplicated dependencies that never contain the consuming rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    from: Label,
    labels: BTreeSet<Label>,
}

impl LabelSet {
    pub fn new(from: Label) -> Self {
        Self {
            from,
            labels: BTreeSet::new(),
        }
    }

    /// Add `label` unless it is the consuming rule. Returns true if it was new.
    pub fn add(&mut self, label: Label) -> bool {
        if label == self.from {
            return false;
        }
        self.labels.insert(label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Labels rendered relative to the consuming rule's package
    pub fn labels(&self) -> Vec<String> {
        let mut rendered: Vec<String> = self
            .labels
            .iter()
            .map(|l| l.rel(&self.from.repo, &self.from.pkg))
            .collect();
        rendered.sort();
        rendered.dedup();
        rendered
    }
}
