//! Artifact manager port

use std::collections::BTreeSet;

use thiserror::Error;

use crate::shared::models::Label;

/// Why an artifact lookup produced no label. Never fatal to resolution.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("no artifact exports package {0:?}")]
    NotFound(String),

    #[error("package {package:?} is exported by multiple artifacts: {}", .artifacts.join(", "))]
    Ambiguous {
        package: String,
        artifacts: Vec<String>,
    },

    #[error("failed to read lock file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed lock file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Looks up the external artifact that exports a package
pub trait ArtifactResolver: Send + Sync {
    /// Label of the artifact exporting `package`, skipping coordinates listed
    /// in `excluded` and naming the label after `repository_name`.
    fn resolve_artifact(
        &self,
        package: &str,
        excluded: &BTreeSet<String>,
        repository_name: &str,
    ) -> Result<Label, ArtifactError>;
}
