//! Repository-wide generation
//!
//! Three passes over the repository:
//! 1. walk directories top-down, building the configuration tree and
//!    generating each directory's rules
//! 2. index every generated rule by the packages it provides
//! 3. resolve each rule's imports into `deps`, in parallel across directories

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use super::diagnostics::{Diagnostic, Diagnostics};
use super::generate::generate_package;
use super::result::{PackageResult, RunResult};
use crate::config::{Configs, KotlinConfig, RunConfig};
use crate::errors::Result;
use crate::features::parsing::infrastructure::KotlinParser;
use crate::features::parsing::ports::Parser;
use crate::features::resolution::application::{index_rules, ImportResolver};
use crate::features::resolution::infrastructure::MavenInstallResolver;
use crate::features::resolution::ports::ArtifactResolver;
use crate::features::rule_emission::domain::{AttrValue, EmptyRule, Rule};
use crate::features::rule_emission::infrastructure::BuildFile;
use crate::shared::models::Label;

/// A directory whose rules are waiting for resolution
struct PendingPackage {
    rel: String,
    config: Arc<KotlinConfig>,
    rules: Vec<Rule>,
    empty: Vec<EmptyRule>,
}

/// Generates and resolves the rules of a repository
pub struct Generator {
    repo_root: PathBuf,
    run: RunConfig,
    parser: Box<dyn Parser>,
    artifacts: Option<Box<dyn ArtifactResolver>>,
}

impl Generator {
    /// Generator with the tree-sitter parser and no artifact manager
    pub fn new(repo_root: impl Into<PathBuf>, run: RunConfig) -> Self {
        Self {
            repo_root: repo_root.into(),
            run,
            parser: Box::new(KotlinParser::new()),
            artifacts: None,
        }
    }

    /// Generator for `run`, loading its `maven_install` lock file if one is
    /// configured. Relative lock file paths start at the repository root.
    pub fn from_run_config(repo_root: impl Into<PathBuf>, run: RunConfig) -> Result<Self> {
        let repo_root = repo_root.into();
        let lock_file = run.maven_install.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                repo_root.join(path)
            }
        });

        let mut generator = Self::new(repo_root, run);
        if let Some(lock_file) = lock_file {
            let resolver = MavenInstallResolver::from_file(&lock_file)?;
            info!(
                path = %lock_file.display(),
                packages = resolver.package_count(),
                "Maven resolver enabled"
            );
            generator = generator.with_artifact_resolver(Box::new(resolver));
        }
        Ok(generator)
    }

    pub fn with_artifact_resolver(mut self, artifacts: Box<dyn ArtifactResolver>) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    pub fn with_parser(mut self, parser: Box<dyn Parser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Run all passes. Fails on the first ambiguity, rule collision or
    /// invalid directive.
    pub fn run(&self) -> Result<RunResult> {
        let start = Instant::now();
        let mut diagnostics = Diagnostics::new();

        let mut pending = self.generate_all(&mut diagnostics)?;

        let index = index_rules(pending.iter().flat_map(|package| {
            package
                .rules
                .iter()
                .map(move |rule| (Label::new("", package.rel.clone(), rule.name()), rule))
        }));

        let mut resolver = ImportResolver::new(&index);
        if let Some(artifacts) = &self.artifacts {
            resolver = resolver.with_artifact_resolver(artifacts.as_ref());
        }

        let unresolved: Vec<Vec<Diagnostic>> = pending
            .par_iter_mut()
            .map(|package| resolve_package(&resolver, package))
            .collect::<Result<_>>()?;
        for package_diagnostics in unresolved {
            diagnostics.extend(package_diagnostics);
        }

        let packages: Vec<PackageResult> = pending
            .into_iter()
            .filter(|p| !p.rules.is_empty() || !p.empty.is_empty())
            .map(|p| PackageResult {
                rel: p.rel,
                rules: p.rules,
                empty: p.empty,
            })
            .collect();

        info!(
            packages = packages.len(),
            diagnostics = diagnostics.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Generation finished"
        );
        Ok(RunResult {
            packages,
            diagnostics,
        })
    }

    /// Pass 1: configuration tree and per-directory rules, parents first
    fn generate_all(&self, diagnostics: &mut Diagnostics) -> Result<Vec<PendingPackage>> {
        let mut configs = Configs::new();
        let mut pending = Vec::new();

        let walker = WalkDir::new(&self.repo_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let rel = relative_path(&self.repo_root, entry.path());
            let existing = BuildFile::find(entry.path(), &self.run.build_file_names)?;

            let mut config = match configs.parent_for_package(&rel) {
                Some(parent) => KotlinConfig::new_child(parent, rel.clone()),
                None => self.run.root_config(),
            };
            if let Some(file) = &existing {
                config.apply_directives(&file.directives)?;
            }
            let config = configs.insert(config);

            let generation = generate_package(
                self.parser.as_ref(),
                entry.path(),
                &config,
                existing.as_ref(),
                self.run.max_workers,
            )?;
            diagnostics.extend(generation.diagnostics);

            if !generation.result.is_empty() {
                pending.push(PendingPackage {
                    rel,
                    config,
                    rules: generation.result.gen,
                    empty: generation.result.empty,
                });
            }
        }

        debug!(
            directories = configs.len(),
            packages = pending.len(),
            "Generation pass done"
        );
        Ok(pending)
    }
}

/// Pass 3 for one directory: set `deps` on each rule
fn resolve_package(
    resolver: &ImportResolver<'_>,
    package: &mut PendingPackage,
) -> Result<Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();

    for rule in &mut package.rules {
        let Some(target) = rule.private().cloned() else {
            continue;
        };
        let from = Label::new("", package.rel.clone(), rule.name());
        let start = Instant::now();
        info!("resolving {}", from);

        let resolved = resolver.resolve_all(&package.config, &target, &from)?;
        for unresolved in &resolved.unresolved {
            warn!("Resolution error {}", unresolved);
            diagnostics.push(Diagnostic::unresolved_import(&package.rel, unresolved));
        }
        if !resolved.deps.is_empty() {
            rule.set_attr("deps", AttrValue::List(resolved.deps.labels()));
        }

        info!(
            deps = resolved.deps.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "resolved {}",
            from
        );
    }

    Ok(diagnostics)
}

/// Hidden directories and Bazel output symlinks are never packages
fn is_skipped_dir(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.depth() == 1 && name.starts_with("bazel-"))
}

/// `root/a/b` → `a/b`, the root itself → ``
fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .map(|p| {
            p.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}
