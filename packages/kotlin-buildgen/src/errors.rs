//! Error types for kotlin-buildgen
//!
//! Provides unified error handling across the crate. Only fatal conditions
//! live here; unresolved imports and parse errors are reported as
//! [`Diagnostic`](crate::pipeline::Diagnostic)s instead.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::resolution::ports::ArtifactError;
use crate::shared::models::Label;

/// Main error type for kotlin-buildgen operations
#[derive(Debug, Error)]
pub enum BuildgenError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Artifact lock file could not be loaded
    #[error("Artifact index error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Parser could not be set up
    #[error("Parse error: {0}")]
    Parse(String),

    /// More than one rule provides an imported identifier
    #[error(
        "Importing identifier {identifier:?} (from {context}) resolved to multiple targets ({}) \
         - this must be fixed using the \"gazelle:resolve\" directive",
        join_labels(.candidates)
    )]
    AmbiguousImport {
        identifier: String,
        context: String,
        candidates: Vec<Label>,
    },

    /// A generated rule name is already taken by a rule of another kind
    #[error(
        "a target of kind {existing_kind:?} with the same name {name:?} already exists in //{pkg}; \
         cannot generate a {generated_kind:?} rule with that name"
    )]
    RuleCollision {
        pkg: String,
        name: String,
        existing_kind: String,
        generated_kind: String,
    },
}

fn join_labels(labels: &[Label]) -> String {
    labels
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl BuildgenError {
    /// Create a parse setup error
    pub fn parse(msg: impl Into<String>) -> Self {
        BuildgenError::Parse(msg.into())
    }
}

/// Result type alias for kotlin-buildgen operations
pub type Result<T> = std::result::Result<T, BuildgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguity_message_lists_candidates() {
        let err = BuildgenError::AmbiguousImport {
            identifier: "com.example".to_string(),
            context: "the \"com.example.Foo\" import statement in \"a/A.kt\"".to_string(),
            candidates: vec![Label::new("", "a", "a"), Label::new("", "b", "lib")],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"com.example\""));
        assert!(msg.contains("//a, //b:lib"));
        assert!(msg.contains("gazelle:resolve"));
    }

    #[test]
    fn test_collision_message() {
        let err = BuildgenError::RuleCollision {
            pkg: "src".to_string(),
            name: "src".to_string(),
            existing_kind: "java_library".to_string(),
            generated_kind: "kt_jvm_library".to_string(),
        };
        assert!(err.to_string().contains("\"java_library\""));
    }
}
