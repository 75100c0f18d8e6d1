//! Generated rule descriptions

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::features::targets::domain::Target;

/// Rule kinds produced for Kotlin targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    KtJvmLibrary,
    KtJvmBinary,
    KtJvmTest,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::KtJvmLibrary => "kt_jvm_library",
            RuleKind::KtJvmBinary => "kt_jvm_binary",
            RuleKind::KtJvmTest => "kt_jvm_test",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RuleKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Attribute value of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    String(String),
    List(Vec<String>),
    Bool(bool),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(s) => write!(f, "{:?}", s),
            AttrValue::Bool(true) => f.write_str("True"),
            AttrValue::Bool(false) => f.write_str("False"),
            AttrValue::List(items) if items.len() <= 1 => {
                write!(f, "[")?;
                for item in items {
                    write!(f, "{:?}", item)?;
                }
                write!(f, "]")
            }
            AttrValue::List(items) => {
                writeln!(f, "[")?;
                for item in items {
                    writeln!(f, "        {:?},", item)?;
                }
                write!(f, "    ]")
            }
        }
    }
}

/// A rule to create or update in a build file.
///
/// The target the rule was generated from rides along as private data, so
/// the indexing pass can ask what the rule provides and the resolve pass can
/// read its imports.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    name: String,
    /// Attributes in insertion order
    attrs: Vec<(String, AttrValue)>,
    private: Option<Arc<Target>>,
}

impl Rule {
    pub fn new(kind: RuleKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            attrs: Vec::new(),
            private: None,
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set or replace an attribute
    pub fn set_attr(&mut self, key: &str, value: AttrValue) {
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((key.to_string(), value)),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn attr_string(&self, key: &str) -> Option<&str> {
        match self.attr(key) {
            Some(AttrValue::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn attr_strings(&self, key: &str) -> Option<&[String]> {
        match self.attr(key) {
            Some(AttrValue::List(items)) => Some(items),
            _ => None,
        }
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn set_private(&mut self, target: Arc<Target>) {
        self.private = Some(target);
    }

    /// The target this rule was generated from
    pub fn private(&self) -> Option<&Arc<Target>> {
        self.private.as_ref()
    }
}

impl PartialEq for Rule {
    /// Private data is not part of the rule's identity
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.name == other.name && self.attrs == other.attrs
    }
}

impl Eq for Rule {}

impl fmt::Display for Rule {
    /// Starlark rendering
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}(", self.kind)?;
        writeln!(f, "    name = {:?},", self.name)?;
        for (key, value) in &self.attrs {
            writeln!(f, "    {} = {},", key, value)?;
        }
        write!(f, ")")
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attrs.len() + 2))?;
        map.serialize_entry("kind", &self.kind)?;
        map.serialize_entry("name", &self.name)?;
        for (key, value) in &self.attrs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Marker to delete an existing rule that no longer has sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyRule {
    pub kind: RuleKind,
    pub name: String,
}

impl fmt::Display for EmptyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "# delete {}(name = {:?})", self.kind, self.name)
    }
}

/// Rules produced for one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResult {
    pub gen: Vec<Rule>,
    pub empty: Vec<EmptyRule>,
}

impl GenerateResult {
    pub fn is_empty(&self) -> bool {
        self.gen.is_empty() && self.empty.is_empty()
    }
}
