//! Resolution types
//!
//! Import specs are what rules provide and what imports ask for; a
//! [`ResolutionOutcome`] is the answer for one (import, consuming rule) pair.

use std::fmt;

use serde::Serialize;

use crate::config::LANGUAGE_NAME;
use crate::shared::models::{Identifier, Label};

/// An importable name in a given language
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ImportSpec {
    pub lang: String,
    pub imp: String,
}

impl ImportSpec {
    pub fn new(lang: impl Into<String>, imp: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            imp: imp.into(),
        }
    }

    /// The Kotlin spec of a package path or a prefix of one
    pub fn kotlin(identifier: &Identifier) -> Self {
        Self::new(LANGUAGE_NAME, identifier.literal())
    }
}

impl fmt::Display for ImportSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lang, self.imp)
    }
}

/// A rule that provides a looked-up import spec
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FindResult {
    pub label: Label,
}

impl FindResult {
    pub fn new(label: Label) -> Self {
        Self { label }
    }

    /// True when the provider is the consuming rule itself
    pub fn is_self_import(&self, from: &Label) -> bool {
        &self.label == from
    }
}

/// Result of resolving one import for one consuming rule.
///
/// Fatal ambiguities are not an outcome; they surface as
/// [`BuildgenError::AmbiguousImport`](crate::errors::BuildgenError::AmbiguousImport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Only the consuming rule provides the import, no edge is needed
    None,
    /// Nothing provides the import or any of its parents
    NotFound,
    /// Resolved to a dependency
    Label(Label),
    /// Part of the Kotlin or Java standard library
    NativeKotlin,
}

impl ResolutionOutcome {
    pub fn label(&self) -> Option<&Label> {
        match self {
            ResolutionOutcome::Label(label) => Some(label),
            _ => None,
        }
    }
}

/// An import that could not be resolved for a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedImport {
    /// The import as written, e.g. `x.y.z.*`
    pub import: String,
    /// Files of the rule that contain the import
    pub origins: Vec<String>,
    /// The consuming rule
    pub from: Label,
}

impl fmt::Display for UnresolvedImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Import {:?} from {:?} is an unknown dependency. Possible solutions:\n\
             \t1. Instruct the generator to resolve to a known dependency using a directive:\n\
             \t\t# gazelle:resolve [src-lang] kotlin import-string label",
            self.import,
            self.origins.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_import() {
        let from = Label::new("", "a", "a");
        assert!(FindResult::new(from.clone()).is_self_import(&from));
        assert!(!FindResult::new(Label::new("", "b", "b")).is_self_import(&from));
    }

    #[test]
    fn test_kotlin_spec() {
        let spec = ImportSpec::kotlin(&"com.example".parse().unwrap());
        assert_eq!(spec, ImportSpec::new("kotlin", "com.example"));
        assert_eq!(spec.to_string(), "kotlin:com.example");
    }

    #[test]
    fn test_unresolved_message() {
        let unresolved = UnresolvedImport {
            import: "x.y.z.*".to_string(),
            origins: vec!["A.kt".to_string(), "B.kt".to_string()],
            from: Label::new("", "a/b/c", "c"),
        };
        let msg = unresolved.to_string();
        assert!(msg.starts_with("Import \"x.y.z.*\" from \"A.kt, B.kt\" is an unknown dependency"));
        assert!(msg.contains("# gazelle:resolve"));
    }
}
