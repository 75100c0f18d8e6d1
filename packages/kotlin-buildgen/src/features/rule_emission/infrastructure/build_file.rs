//! Existing build files
//!
//! A minimal reader: rule calls that start at column 0 and carry a
//! `name = "..."` attribute, plus `# gazelle:` directives. That is all the
//! collision check, deletion markers and configuration need.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{parse_directives, Directive};
use crate::errors::Result;

static RULE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("rule call regex is valid")
});

static NAME_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bname\s*=\s*"([^"]*)""#).expect("name attribute regex is valid")
});

/// A rule found in an existing build file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingRule {
    pub kind: String,
    pub name: String,
}

/// The parts of an existing build file the generator reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildFile {
    pub path: PathBuf,
    pub rules: Vec<ExistingRule>,
    pub directives: Vec<Directive>,
}

impl BuildFile {
    /// Read the first build file of `dir` found among `names`
    pub fn find(dir: &Path, names: &[String]) -> Result<Option<Self>> {
        for name in names {
            let path = dir.join(name);
            if path.is_file() {
                let content = std::fs::read_to_string(&path)?;
                return Ok(Some(Self::parse(path, &content)));
            }
        }
        Ok(None)
    }

    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Self {
        let starts: Vec<_> = RULE_CALL.captures_iter(content).collect();
        let mut rules = Vec::new();

        for (i, call) in starts.iter().enumerate() {
            let (Some(whole), Some(kind)) = (call.get(0), call.get(1)) else {
                continue;
            };
            let body_end = starts
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(content.len(), |m| m.start());
            let body = &content[whole.end()..body_end];

            if let Some(name) = NAME_ATTR.captures(body).and_then(|c| c.get(1)) {
                rules.push(ExistingRule {
                    kind: kind.as_str().to_string(),
                    name: name.as_str().to_string(),
                });
            }
        }

        Self {
            path: path.into(),
            rules,
            directives: parse_directives(content),
        }
    }

    pub fn rule(&self, name: &str) -> Option<&ExistingRule> {
        self.rules.iter().find(|r| r.name == name)
    }
}
