//! Configuration error types

use thiserror::Error;

use crate::shared::models::LabelError;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Range validation error
    #[error("Invalid value for field '{field}': {value}. {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },

    /// A known `# gazelle:` directive with a malformed value
    #[error("Invalid directive '# gazelle:{directive} {value}' in {location}: {reason}")]
    InvalidDirective {
        directive: String,
        value: String,
        location: String,
        reason: String,
    },

    /// Label in an override directive could not be parsed
    #[error("Invalid label in configuration: {0}")]
    Label(#[from] LabelError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub fn invalid_directive(
        directive: impl Into<String>,
        value: impl Into<String>,
        location: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDirective {
            directive: directive.into(),
            value: value.into(),
            location: location.into(),
            reason: reason.into(),
        }
    }
}
