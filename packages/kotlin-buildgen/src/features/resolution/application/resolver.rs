//! Import resolution engine
//!
//! Maps an import identifier to at most one dependency label. For each
//! identifier, and then for each of its parents, the strategies are tried in
//! order, the first definitive answer winning:
//!
//! 1. `# gazelle:resolve` overrides
//! 2. the rule index (more than one non-self provider is fatal)
//! 3. the Kotlin and Java standard libraries
//! 4. the artifact manager (failures only fall through)
//!
//! An import like `com.foo.Bar` usually names a symbol inside the indexed
//! package `com.foo`, hence the walk over shorter identifiers.

use tracing::debug;

use crate::config::KotlinConfig;
use crate::errors::{BuildgenError, Result};
use crate::features::resolution::domain::{
    ImportSpec, LabelSet, ResolutionOutcome, UnresolvedImport,
};
use crate::features::resolution::infrastructure::native::{
    is_java_stdlib, is_native_import, StdlibPredicate,
};
use crate::features::resolution::ports::{ArtifactResolver, OverrideLookup, ProviderIndex};
use crate::features::targets::domain::Target;
use crate::shared::models::{Identifier, Label};

/// Dependencies of one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDeps {
    pub deps: LabelSet,
    /// Imports nothing provides, in import literal order
    pub unresolved: Vec<UnresolvedImport>,
}

/// Resolves imports against the rule index and the external collaborators.
///
/// Holds only shared references, so one resolver can serve many rules
/// concurrently.
pub struct ImportResolver<'a> {
    index: &'a dyn ProviderIndex,
    artifacts: Option<&'a dyn ArtifactResolver>,
    is_host_stdlib: StdlibPredicate,
}

impl<'a> ImportResolver<'a> {
    pub fn new(index: &'a dyn ProviderIndex) -> Self {
        Self {
            index,
            artifacts: None,
            is_host_stdlib: is_java_stdlib,
        }
    }

    pub fn with_artifact_resolver(mut self, artifacts: &'a dyn ArtifactResolver) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    /// Replace the JDK package predicate
    pub fn with_stdlib_predicate(mut self, is_host_stdlib: StdlibPredicate) -> Self {
        self.is_host_stdlib = is_host_stdlib;
        self
    }

    /// Resolve `identifier` for the rule `from`.
    ///
    /// `config` is the configuration of `from`'s directory. `context`
    /// describes where the import comes from and is only evaluated for
    /// error messages.
    pub fn resolve<F>(
        &self,
        config: &KotlinConfig,
        identifier: &Identifier,
        from: &Label,
        context: F,
    ) -> Result<ResolutionOutcome>
    where
        F: Fn() -> String,
    {
        for candidate in identifier.ancestors() {
            let spec = ImportSpec::kotlin(&candidate);

            if let Some(label) = config.find_rule_with_override(&spec) {
                return Ok(ResolutionOutcome::Label(label));
            }

            let matches = self.index.find_providers(&spec);
            if !matches.is_empty() {
                let filtered: Vec<&Label> = matches
                    .iter()
                    .filter(|m| !m.is_self_import(from))
                    .map(|m| &m.label)
                    .collect();
                return match filtered.as_slice() {
                    // The matches were self imports, no dependency is needed
                    [] => Ok(ResolutionOutcome::None),
                    [only] => Ok(ResolutionOutcome::Label((*only).clone())),
                    _ => Err(BuildgenError::AmbiguousImport {
                        identifier: spec.imp.clone(),
                        context: context(),
                        candidates: matches.iter().map(|m| m.label.clone()).collect(),
                    }),
                };
            }

            if is_native_import(&spec.imp, self.is_host_stdlib) {
                return Ok(ResolutionOutcome::NativeKotlin);
            }

            if let Some(artifacts) = self.artifacts {
                let java = config.java();
                match artifacts.resolve_artifact(
                    &spec.imp,
                    java.excluded_artifacts(),
                    java.maven_repository_name(),
                ) {
                    Ok(label) => return Ok(ResolutionOutcome::Label(label)),
                    Err(e) => {
                        debug!(identifier = %spec.imp, error = %e, "Maven resolution failed");
                    }
                }
            }
        }

        Ok(ResolutionOutcome::NotFound)
    }

    /// Resolve every unique import of `target`, plus the implicit dependency
    /// of a test on the library providing its package.
    ///
    /// Unresolved imports are collected; an ambiguity aborts the whole batch.
    pub fn resolve_all(
        &self,
        config: &KotlinConfig,
        target: &Target,
        from: &Label,
    ) -> Result<ResolvedDeps> {
        let mut deps = LabelSet::new(from.clone());
        let mut unresolved = Vec::new();

        if let Some(package) = target.as_test().and_then(|t| t.package.as_ref()) {
            let context = || {
                format!(
                    "implicit test dependency on library that provides the Kotlin/Java package {:?}",
                    package.literal()
                )
            };
            if let ResolutionOutcome::Label(label) = self.resolve(config, package, from, context)? {
                deps.add(label);
            }
        }

        for import in target.base().imports() {
            let outcome = self.resolve(config, import.statement.identifier(), from, || {
                import.context()
            })?;

            match outcome {
                ResolutionOutcome::Label(label) => {
                    deps.add(label);
                }
                ResolutionOutcome::NotFound => {
                    debug!(
                        import = %import.statement,
                        target = %from,
                        "import not found"
                    );
                    unresolved.push(UnresolvedImport {
                        import: import.statement.to_string(),
                        origins: import.origins.iter().cloned().collect(),
                        from: from.clone(),
                    });
                }
                ResolutionOutcome::NativeKotlin | ResolutionOutcome::None => {}
            }
        }

        Ok(ResolvedDeps { deps, unresolved })
    }
}
