//! Bazel build labels
//!
//! `@repo//pkg/path:name`. The main repository has an empty `repo`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("label {0:?} must start with '@', '//' or ':'")]
    NotAbsolute(String),

    #[error("label {0:?} has an empty target name")]
    EmptyName(String),

    #[error("label {0:?} contains invalid characters")]
    InvalidCharacters(String),
}

/// A reference to a build target
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label {
    pub repo: String,
    pub pkg: String,
    pub name: String,
}

impl Label {
    pub fn new(repo: impl Into<String>, pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            pkg: pkg.into(),
            name: name.into(),
        }
    }

    /// Parse a label that may be relative (`:name`) to the package `pkg` of
    /// the main repository.
    pub fn parse_relative(text: &str, pkg: &str) -> Result<Self, LabelError> {
        match text.strip_prefix(':') {
            Some(name) => {
                validate(text, name)?;
                if name.is_empty() {
                    return Err(LabelError::EmptyName(text.to_string()));
                }
                Ok(Self::new("", pkg, name))
            }
            None => text.parse(),
        }
    }

    /// Render this label as seen from `pkg` in `repo`: `:name` inside the same
    /// package, `//pkg:name` inside the same repository.
    pub fn rel(&self, repo: &str, pkg: &str) -> String {
        if self.repo != repo {
            return self.to_string();
        }
        if self.pkg == pkg {
            return format!(":{}", self.name);
        }
        Self::new("", self.pkg.clone(), self.name.clone()).to_string()
    }
}

fn validate(text: &str, part: &str) -> Result<(), LabelError> {
    if part
        .chars()
        .any(|c| c.is_whitespace() || c == '"' || c == '\'' || c == '\\')
    {
        return Err(LabelError::InvalidCharacters(text.to_string()));
    }
    Ok(())
}

impl FromStr for Label {
    type Err = LabelError;

    /// Parse an absolute label: `@repo//pkg:name`, `//pkg:name`, `//pkg`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (repo, rest) = match text.strip_prefix('@') {
            Some(after_at) => {
                // `@@canonical` repos are treated like `@apparent` ones
                let after_at = after_at.trim_start_matches('@');
                match after_at.split_once("//") {
                    Some((repo, rest)) => (repo, rest),
                    None => return Err(LabelError::NotAbsolute(text.to_string())),
                }
            }
            None => match text.strip_prefix("//") {
                Some(rest) => ("", rest),
                None => return Err(LabelError::NotAbsolute(text.to_string())),
            },
        };
        validate(text, repo)?;
        validate(text, rest)?;

        let (pkg, name) = match rest.split_once(':') {
            Some((pkg, name)) => (pkg, name.to_string()),
            None => {
                let base = rest.rsplit('/').next().unwrap_or(rest);
                (rest, base.to_string())
            }
        };
        if name.is_empty() {
            return Err(LabelError::EmptyName(text.to_string()));
        }

        Ok(Self::new(repo, pkg, name))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.repo.is_empty() {
            write!(f, "@{}", self.repo)?;
        }
        let base = self.pkg.rsplit('/').next().unwrap_or(&self.pkg);
        if !self.pkg.is_empty() && base == self.name {
            write!(f, "//{}", self.pkg)
        } else {
            write!(f, "//{}:{}", self.pkg, self.name)
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute_forms() {
        assert_eq!(
            "@maven//:com_google_guava_guava".parse::<Label>().unwrap(),
            Label::new("maven", "", "com_google_guava_guava")
        );
        assert_eq!(
            "//src/lib:core".parse::<Label>().unwrap(),
            Label::new("", "src/lib", "core")
        );
        assert_eq!(
            "//src/lib".parse::<Label>().unwrap(),
            Label::new("", "src/lib", "lib")
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("src/lib:core".parse::<Label>().is_err());
        assert!("//src/lib:".parse::<Label>().is_err());
        assert!("//src lib:x".parse::<Label>().is_err());
    }

    #[test]
    fn test_parse_relative() {
        assert_eq!(
            Label::parse_relative(":util", "a/b").unwrap(),
            Label::new("", "a/b", "util")
        );
        assert_eq!(
            Label::parse_relative("//x:y", "a/b").unwrap(),
            Label::new("", "x", "y")
        );
    }

    #[test]
    fn test_display_shortens_matching_name() {
        assert_eq!(Label::new("", "a/b", "b").to_string(), "//a/b");
        assert_eq!(Label::new("", "a/b", "c").to_string(), "//a/b:c");
        assert_eq!(Label::new("", "", "root").to_string(), "//:root");
        assert_eq!(Label::new("maven", "", "x").to_string(), "@maven//:x");
    }

    #[test]
    fn test_rel() {
        let label = Label::new("", "a/b", "lib");
        assert_eq!(label.rel("", "a/b"), ":lib");
        assert_eq!(label.rel("", "c"), "//a/b:lib");
        let external = Label::new("maven", "", "x");
        assert_eq!(external.rel("", "a/b"), "@maven//:x");
    }
}
