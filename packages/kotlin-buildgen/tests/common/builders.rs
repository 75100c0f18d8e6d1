//! Temporary repository builder

use std::fs;
use std::path::Path;

use kotlin_buildgen::config::RunConfig;
use kotlin_buildgen::pipeline::Generator;
use kotlin_buildgen::{Result, RunResult};
use tempfile::TempDir;

/// Repository laid out on disk for a single test
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp repo"),
        }
    }

    /// Write `content` to the repository-relative `path`, creating parents
    pub fn with_file(self, path: &str, content: impl AsRef<str>) -> Self {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(full, content.as_ref()).expect("write fixture file");
        self
    }

    /// Write a `BUILD.bazel` file into directory `rel`
    pub fn with_build_file(self, rel: &str, content: &str) -> Self {
        let path = if rel.is_empty() {
            "BUILD.bazel".to_string()
        } else {
            format!("{rel}/BUILD.bazel")
        };
        self.with_file(&path, content)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run with the default configuration
    pub fn generate(&self) -> Result<RunResult> {
        self.generate_with(RunConfig::default())
    }

    pub fn generate_with(&self, run: RunConfig) -> Result<RunResult> {
        Generator::from_run_config(self.dir.path(), run)?.run()
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
