//! Dotted Kotlin identifiers
//!
//! An [`Identifier`] is the `a.b.c` name found in package headers and import
//! headers. It is an immutable value: [`Identifier::parent`] and
//! [`Identifier::child`] always return new identifiers.
//!
//! Grammar: <https://kotlinlang.org/spec/syntax-and-grammar.html#grammar-rule-identifier>

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// `(Letter | '_') {Letter | '_' | UnicodeDigit}`, the unquoted form of the
/// Kotlin `Identifier` lexical rule.
static UNQUOTED_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}_][\p{L}_\d]*$").expect("identifier regex is valid"));

/// Errors produced when building identifiers from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// A component does not match the unquoted identifier grammar
    #[error("{0:?} is not a valid Kotlin identifier component (expected [\\p{{L}}_][\\p{{L}}_\\d]*)")]
    InvalidComponent(String),

    /// An identifier needs at least one component
    #[error("identifier must have at least one component")]
    Empty,
}

/// One component of an [`Identifier`] (the `simpleIdentifier` grammar rule)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimpleIdentifier {
    literal: String,
}

impl SimpleIdentifier {
    /// Create a component from an unquoted identifier literal.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let value = value.into();
        if UNQUOTED_IDENTIFIER.is_match(&value) {
            Ok(Self { literal: value })
        } else {
            Err(IdentifierError::InvalidComponent(value))
        }
    }

    /// Create a component from source text as written, which may be
    /// backtick-quoted. Unnecessary backticks are removed.
    pub(crate) fn from_source(text: &str) -> Self {
        Self {
            literal: text.to_string(),
        }
        .normalize()
    }

    /// The component as it would appear in Kotlin source code
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Strip backticks when the quoted text is a plain identifier anyway.
    ///
    /// `` `foo` `` becomes `foo`; `` `is fun` `` stays quoted.
    pub fn normalize(self) -> Self {
        let Some(inner) = self
            .literal
            .strip_prefix('`')
            .and_then(|rest| rest.strip_suffix('`'))
        else {
            return self;
        };

        if UNQUOTED_IDENTIFIER.is_match(inner) {
            Self {
                literal: inner.to_string(),
            }
        } else {
            self
        }
    }
}

impl fmt::Display for SimpleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// A dot-delimited sequence of [`SimpleIdentifier`]s.
///
/// Invariant: there is always at least one component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    parts: Vec<SimpleIdentifier>,
}

impl Identifier {
    /// Build an identifier from its components.
    pub fn new(parts: Vec<SimpleIdentifier>) -> Result<Self, IdentifierError> {
        if parts.is_empty() {
            return Err(IdentifierError::Empty);
        }
        Ok(Self { parts })
    }

    /// Identifier with a single component
    pub fn simple(part: SimpleIdentifier) -> Self {
        Self { parts: vec![part] }
    }

    /// The identifier with the last component removed, or `None` when only
    /// one component is left.
    ///
    /// `foo.bar.baz` → `foo.bar`; `foo` → `None`
    pub fn parent(&self) -> Option<Identifier> {
        if self.parts.len() <= 1 {
            return None;
        }
        Some(Self {
            parts: self.parts[..self.parts.len() - 1].to_vec(),
        })
    }

    /// The identifier with one more component appended.
    ///
    /// `foo.bar` + `baz` → `foo.bar.baz`
    pub fn child(&self, component: SimpleIdentifier) -> Identifier {
        let mut parts = Vec::with_capacity(self.parts.len() + 1);
        parts.extend_from_slice(&self.parts);
        parts.push(component);
        Self { parts }
    }

    /// This identifier followed by each of its parents, longest first.
    pub fn ancestors(&self) -> impl Iterator<Item = Identifier> + '_ {
        (1..=self.parts.len()).rev().map(move |len| Self {
            parts: self.parts[..len].to_vec(),
        })
    }

    /// The dot-joined form, as it appears in source code
    pub fn literal(&self) -> String {
        self.parts
            .iter()
            .map(SimpleIdentifier::literal)
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn components(&self) -> &[SimpleIdentifier] {
        &self.parts
    }

    /// Number of components (always ≥ 1)
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Last component
    pub fn last(&self) -> &SimpleIdentifier {
        // Non-empty by construction
        &self.parts[self.parts.len() - 1]
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    /// Parse a dotted literal such as `com.example.Foo`.
    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let parts = literal
            .split('.')
            .map(SimpleIdentifier::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parts)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(part.literal())?;
        }
        Ok(())
    }
}

impl Serialize for SimpleIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.literal())
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.literal())
    }
}
