//! Artifact lookup backed by a `maven_install.json` lock file
//!
//! Only the `packages` section is read:
//!
//! ```json
//! {
//!   "packages": {
//!     "com.google.guava:guava": ["com.google.common.base", "com.google.common.collect"]
//!   }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::debug;

use crate::features::resolution::ports::{ArtifactError, ArtifactResolver};
use crate::shared::models::Label;

#[derive(Debug, Deserialize)]
struct LockFile {
    #[serde(default)]
    packages: BTreeMap<String, Vec<String>>,
}

/// Package → artifact coordinates, from a rules_jvm_external lock file
#[derive(Debug, Default)]
pub struct MavenInstallResolver {
    /// Sorted coordinates per exported package
    artifacts_by_package: FxHashMap<String, Vec<String>>,
}

impl MavenInstallResolver {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let resolver = Self::from_json_str(&content)?;
        debug!(
            path = %path.display(),
            packages = resolver.artifacts_by_package.len(),
            "Loaded maven lock file"
        );
        Ok(resolver)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ArtifactError> {
        let lock: LockFile = serde_json::from_str(content)?;
        let mut artifacts_by_package: FxHashMap<String, Vec<String>> = FxHashMap::default();
        // BTreeMap iteration keeps each coordinate list sorted
        for (coordinate, packages) in lock.packages {
            for package in packages {
                artifacts_by_package
                    .entry(package)
                    .or_default()
                    .push(coordinate.clone());
            }
        }
        Ok(Self {
            artifacts_by_package,
        })
    }

    pub fn package_count(&self) -> usize {
        self.artifacts_by_package.len()
    }
}

impl ArtifactResolver for MavenInstallResolver {
    fn resolve_artifact(
        &self,
        package: &str,
        excluded: &BTreeSet<String>,
        repository_name: &str,
    ) -> Result<Label, ArtifactError> {
        let candidates: Vec<&String> = self
            .artifacts_by_package
            .get(package)
            .map(|coords| coords.iter().filter(|c| !excluded.contains(*c)).collect())
            .unwrap_or_default();

        match candidates.as_slice() {
            [] => Err(ArtifactError::NotFound(package.to_string())),
            [coordinate] => Ok(Label::new(
                repository_name,
                "",
                coordinate_to_target_name(coordinate),
            )),
            many => Err(ArtifactError::Ambiguous {
                package: package.to_string(),
                artifacts: many.iter().map(|c| c.to_string()).collect(),
            }),
        }
    }
}

/// `com.google.guava:guava` → `com_google_guava_guava`
pub fn coordinate_to_target_name(coordinate: &str) -> String {
    coordinate
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LOCK: &str = r#"{
        "__AUTOGENERATED_FILE_DO_NOT_MODIFY_THIS_FILE_MANUALLY": "THERE_IS_NO_DATA_ONLY_ZUUL",
        "packages": {
            "com.google.guava:guava": ["com.google.common.base", "com.google.common.pretend.deep"],
            "com.google.guava:failureaccess": ["com.google.common.util.concurrent.internal"],
            "org.example:one": ["org.example.shared"],
            "org.example:two": ["org.example.shared"]
        }
    }"#;

    fn resolver() -> MavenInstallResolver {
        MavenInstallResolver::from_json_str(LOCK).unwrap()
    }

    #[test]
    fn test_exact_package_match() {
        let label = resolver()
            .resolve_artifact("com.google.common.base", &BTreeSet::new(), "maven")
            .unwrap();
        assert_eq!(label.to_string(), "@maven//:com_google_guava_guava");
    }

    #[test]
    fn test_sub_package_is_not_matched() {
        let result =
            resolver().resolve_artifact("com.google.common.base.Strings", &BTreeSet::new(), "maven");
        assert!(matches!(result, Err(ArtifactError::NotFound(_))));
    }

    #[test]
    fn test_repository_name() {
        let label = resolver()
            .resolve_artifact("com.google.common.base", &BTreeSet::new(), "deps")
            .unwrap();
        assert_eq!(label, Label::new("deps", "", "com_google_guava_guava"));
    }

    #[test]
    fn test_ambiguous_and_exclusions() {
        let resolver = resolver();
        assert!(matches!(
            resolver.resolve_artifact("org.example.shared", &BTreeSet::new(), "maven"),
            Err(ArtifactError::Ambiguous { .. })
        ));

        let excluded = BTreeSet::from(["org.example:one".to_string()]);
        let label = resolver
            .resolve_artifact("org.example.shared", &excluded, "maven")
            .unwrap();
        assert_eq!(label.name, "org_example_two");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LOCK.as_bytes()).unwrap();
        let resolver = MavenInstallResolver::from_file(file.path()).unwrap();
        assert_eq!(resolver.package_count(), 4);
    }

    #[test]
    fn test_malformed_lock_file() {
        assert!(matches!(
            MavenInstallResolver::from_json_str("{ not json"),
            Err(ArtifactError::Json(_))
        ));
    }
}
