//! Target aggregates
//!
//! A target groups the source files of one directory that become a single
//! build rule. Targets live for one generation pass of a directory: they are
//! filled by the classifier, resolved once, and dropped.

use std::collections::{BTreeMap, BTreeSet};

use crate::features::parsing::domain::ImportStatement;
use crate::shared::models::Identifier;

/// One unique import literal of a target and every file that imports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedImport {
    /// The most recently added statement for this literal
    pub statement: ImportStatement,
    /// Files containing an import of this literal, sorted
    pub origins: BTreeSet<String>,
}

impl AggregatedImport {
    /// Describes where the import comes from, for diagnostics.
    ///
    /// `the "a.b.*" import statement in "A.kt"`
    pub fn context(&self) -> String {
        let files = self
            .origins
            .iter()
            .map(|f| format!("{:?}", f))
            .collect::<Vec<_>>()
            .join(", ");
        format!("the {:?} import statement in {}", self.statement.to_string(), files)
    }

    /// Origin files joined for display
    pub fn origin_list(&self) -> String {
        self.origins.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Import aggregate shared by every target kind, keyed by import literal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KotlinTarget {
    imports: BTreeMap<String, AggregatedImport>,
}

impl KotlinTarget {
    /// Merge an import found in `source_path`. A later statement for the same
    /// literal replaces the stored one; origins accumulate.
    pub fn add_import(&mut self, statement: ImportStatement, source_path: &str) {
        let literal = statement.identifier().literal();
        match self.imports.get_mut(&literal) {
            Some(existing) => {
                existing.statement = statement;
                existing.origins.insert(source_path.to_string());
            }
            None => {
                self.imports.insert(
                    literal,
                    AggregatedImport {
                        statement,
                        origins: BTreeSet::from([source_path.to_string()]),
                    },
                );
            }
        }
    }

    /// Unique imports in literal order
    pub fn imports(&self) -> impl Iterator<Item = &AggregatedImport> {
        self.imports.values()
    }

    pub fn import(&self, literal: &str) -> Option<&AggregatedImport> {
        self.imports.get(literal)
    }

    pub fn import_count(&self) -> usize {
        self.imports.len()
    }
}

/// The shared library of a directory: every file that is neither a test nor
/// has a `main` function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibTarget {
    pub base: KotlinTarget,
    pub files: BTreeSet<String>,
    /// Declared packages keyed by literal
    pub packages: BTreeMap<String, Identifier>,
}

impl LibTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, file: impl Into<String>) {
        self.files.insert(file.into());
    }

    pub fn add_package(&mut self, package: Identifier) {
        self.packages.insert(package.literal(), package);
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A single file with a top-level `main` function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinTarget {
    pub base: KotlinTarget,
    pub file: String,
    pub package: Option<Identifier>,
}

impl BinTarget {
    pub fn new(file: impl Into<String>, package: Option<Identifier>) -> Self {
        Self {
            base: KotlinTarget::default(),
            file: file.into(),
            package,
        }
    }
}

/// Test files matching the configured suffixes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestTarget {
    pub base: KotlinTarget,
    pub files: Vec<String>,
    pub package: Option<Identifier>,
    /// Fully qualified class of the test, when it can be derived
    pub test_class: Option<Identifier>,
}

impl TestTarget {
    pub fn new(
        files: Vec<String>,
        package: Option<Identifier>,
        test_class: Option<Identifier>,
    ) -> Self {
        Self {
            base: KotlinTarget::default(),
            files,
            package,
            test_class,
        }
    }
}

/// Any target kind, as attached to a generated rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Library(LibTarget),
    Binary(BinTarget),
    Test(TestTarget),
}

impl Target {
    pub fn base(&self) -> &KotlinTarget {
        match self {
            Target::Library(t) => &t.base,
            Target::Binary(t) => &t.base,
            Target::Test(t) => &t.base,
        }
    }

    /// Packages this target can satisfy imports for. Only libraries provide
    /// anything.
    pub fn provided_packages(&self) -> Vec<String> {
        match self {
            Target::Library(lib) => lib.packages.keys().cloned().collect(),
            Target::Binary(_) | Target::Test(_) => Vec::new(),
        }
    }

    pub fn as_test(&self) -> Option<&TestTarget> {
        match self {
            Target::Test(t) => Some(t),
            _ => None,
        }
    }
}
