//! Configuration system
//!
//! Two layers:
//! - [`RunConfig`]: one optional `buildgen.yaml` per run (versioned schema)
//! - [`KotlinConfig`]: one snapshot per directory, inherited from the parent
//!   directory and adjusted by `# gazelle:` directives in the build file
//!
//! # Examples
//!
//! ```rust,ignore
//! use kotlin_buildgen::config::{Configs, KotlinConfig, RunConfig};
//!
//! let run = RunConfig::from_yaml_file("buildgen.yaml")?;
//! let mut configs = Configs::new();
//! let root = configs.insert(run.root_config());
//! let child = configs.insert(KotlinConfig::new_child(&root, "src/main"));
//! ```

pub mod directives;
pub mod error;
pub mod io;
pub mod kotlin_config;

// Re-exports
pub use directives::{parse_directives, Directive};
pub use error::{ConfigError, ConfigResult};
pub use io::{RunConfig, MAX_WORKER_COUNT};
pub use kotlin_config::{
    Configs, JavaConfig, KotlinConfig, ResolveOverride, DEFAULT_MAVEN_REPOSITORY_NAME,
    LANGUAGE_NAME,
};
