//! Non-fatal findings of a run
//!
//! Parse errors and unresolved imports never stop generation. They are
//! collected here and summarized at the end of the run.

use std::fmt;

use serde::Serialize;

use crate::features::parsing::domain::ParseError;
use crate::features::resolution::domain::UnresolvedImport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    ParseError,
    UnresolvedImport,
}

/// One finding, attributed to a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Repository-relative directory
    pub package: String,
    /// Files the finding is about
    pub files: Vec<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn parse_error(package: &str, error: &ParseError) -> Self {
        Self {
            kind: DiagnosticKind::ParseError,
            package: package.to_string(),
            files: vec![error.file.clone()],
            message: error.to_string(),
        }
    }

    pub fn unresolved_import(package: &str, unresolved: &UnresolvedImport) -> Self {
        Self {
            kind: DiagnosticKind::UnresolvedImport,
            package: package.to_string(),
            files: unresolved.origins.clone(),
            message: unresolved.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::ParseError => write!(f, "//{}: parse error: {}", self.package, self.message),
            DiagnosticKind::UnresolvedImport => {
                write!(f, "//{}: resolution error: {}", self.package, self.message)
            }
        }
    }
}

/// All diagnostics of a run, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.items.extend(diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    /// `3 diagnostics (1 parse error, 2 unresolved imports)`
    pub fn summary(&self) -> String {
        format!(
            "{} diagnostic{} ({} parse error{}, {} unresolved import{})",
            self.len(),
            plural(self.len()),
            self.count(DiagnosticKind::ParseError),
            plural(self.count(DiagnosticKind::ParseError)),
            self.count(DiagnosticKind::UnresolvedImport),
            plural(self.count(DiagnosticKind::UnresolvedImport)),
        )
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
