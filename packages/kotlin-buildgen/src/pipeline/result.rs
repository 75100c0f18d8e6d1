//! Run result types

use std::fmt;

use serde::Serialize;

use super::diagnostics::Diagnostics;
use crate::features::rule_emission::domain::{EmptyRule, Rule};

/// Rules of one directory after resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageResult {
    /// Repository-relative directory ("" at the root)
    pub rel: String,
    pub rules: Vec<Rule>,
    pub empty: Vec<EmptyRule>,
}

impl PackageResult {
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }
}

impl fmt::Display for PackageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# //{}", self.rel)?;
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        for empty in &self.empty {
            writeln!(f, "{}", empty)?;
        }
        Ok(())
    }
}

/// Output of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// Packages with generated or deleted rules, sorted by path
    pub packages: Vec<PackageResult>,
    pub diagnostics: Diagnostics,
}

impl RunResult {
    pub fn package(&self, rel: &str) -> Option<&PackageResult> {
        self.packages.iter().find(|p| p.rel == rel)
    }

    pub fn rule_count(&self) -> usize {
        self.packages.iter().map(|p| p.rules.len()).sum()
    }
}

impl fmt::Display for RunResult {
    /// Starlark text of every package, separated by blank lines
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, package) in self.packages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", package)?;
        }
        Ok(())
    }
}
