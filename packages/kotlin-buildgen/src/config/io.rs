//! Run configuration file (`buildgen.yaml`)
//!
//! ```yaml
//! version: 1
//! maven_install: maven_install.json
//! build_file_names: [BUILD.bazel, BUILD]
//! max_workers: 12
//! test_file_suffixes: [Test.kt]
//! generation_enabled: true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::kotlin_config::KotlinConfig;

/// Upper bound of parse workers per directory
pub const MAX_WORKER_COUNT: usize = 12;

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    maven_install: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    build_file_names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_workers: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    test_file_suffixes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    generation_enabled: Option<bool>,
}

/// Settings of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// `maven_install.json` lock file, relative paths are resolved against the repository root
    pub maven_install: Option<PathBuf>,
    /// Build file names, in lookup order
    pub build_file_names: Vec<String>,
    /// Upper bound of parse workers per directory
    pub max_workers: usize,
    /// Test file suffixes of the root configuration
    pub test_file_suffixes: Vec<String>,
    /// Generation flag of the root configuration
    pub generation_enabled: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            maven_install: None,
            build_file_names: vec!["BUILD.bazel".to_string(), "BUILD".to_string()],
            max_workers: MAX_WORKER_COUNT,
            test_file_suffixes: vec!["Test.kt".to_string()],
            generation_enabled: true,
        }
    }
}

impl RunConfig {
    /// Load a YAML configuration file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse YAML configuration text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let defaults = Self::default();
        let config = Self {
            maven_install: file.maven_install,
            build_file_names: file.build_file_names.unwrap_or(defaults.build_file_names),
            max_workers: file.max_workers.unwrap_or(defaults.max_workers),
            test_file_suffixes: file
                .test_file_suffixes
                .unwrap_or(defaults.test_file_suffixes),
            generation_enabled: file
                .generation_enabled
                .unwrap_or(defaults.generation_enabled),
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to the v1 schema
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            maven_install: self.maven_install.clone(),
            build_file_names: Some(self.build_file_names.clone()),
            max_workers: Some(self.max_workers),
            test_file_suffixes: Some(self.test_file_suffixes.clone()),
            generation_enabled: Some(self.generation_enabled),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.max_workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_workers".to_string(),
                value: "0".to_string(),
                hint: "At least one parse worker is required.".to_string(),
            });
        }
        if self.build_file_names.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "build_file_names".to_string(),
                value: "[]".to_string(),
                hint: "List at least one build file name, e.g. BUILD.bazel.".to_string(),
            });
        }
        if self.test_file_suffixes.iter().any(String::is_empty) {
            return Err(ConfigError::InvalidValue {
                field: "test_file_suffixes".to_string(),
                value: format!("{:?}", self.test_file_suffixes),
                hint: "Empty suffixes would classify every file as a test.".to_string(),
            });
        }
        Ok(())
    }

    /// Configuration of the repository root directory
    pub fn root_config(&self) -> KotlinConfig {
        KotlinConfig::new()
            .with_generation_enabled(self.generation_enabled)
            .with_test_file_suffixes(self.test_file_suffixes.clone())
    }
}
