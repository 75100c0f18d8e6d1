//! Per-file parse records

use std::fmt;

use serde::Serialize;

use crate::shared::models::{Identifier, SimpleIdentifier};

/// A single Kotlin [importHeader].
///
/// [importHeader]: https://kotlinlang.org/spec/syntax-and-grammar.html#grammar-rule-importHeader
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImportStatement {
    identifier: Identifier,
    is_star_import: bool,
    alias: Option<SimpleIdentifier>,
}

impl ImportStatement {
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            is_star_import: false,
            alias: None,
        }
    }

    /// `import a.b.*`
    pub fn star(identifier: Identifier) -> Self {
        Self {
            identifier,
            is_star_import: true,
            alias: None,
        }
    }

    /// `import a.b.C as D`
    pub fn aliased(identifier: Identifier, alias: SimpleIdentifier) -> Self {
        Self {
            identifier,
            is_star_import: false,
            alias: Some(alias),
        }
    }

    /// The identifier part of the import header
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// True for imports of everything in a package
    pub fn is_star_import(&self) -> bool {
        self.is_star_import
    }

    pub fn alias(&self) -> Option<&SimpleIdentifier> {
        self.alias.as_ref()
    }
}

impl fmt::Display for ImportStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.alias, self.is_star_import) {
            (Some(alias), _) => write!(f, "{} as {}", self.identifier, alias),
            (None, true) => write!(f, "{}.*", self.identifier),
            (None, false) => write!(f, "{}", self.identifier),
        }
    }
}

/// Facts extracted from one Kotlin source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Path of the file as passed to the parser
    pub file: String,

    /// Import headers in source order
    pub imports: Vec<ImportStatement>,

    /// Identifier of the [packageHeader], if the file has one
    ///
    /// [packageHeader]: https://kotlinlang.org/spec/syntax-and-grammar.html#grammar-rule-packageHeader
    pub package: Option<Identifier>,

    /// True if the file declares a top-level `main` function
    pub has_main: bool,
}

impl ParseResult {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    pub fn with_package(mut self, package: Identifier) -> Self {
        self.package = Some(package);
        self
    }

    pub fn with_import(mut self, import: ImportStatement) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_main(mut self) -> Self {
        self.has_main = true;
        self
    }
}

/// A syntax problem in a source file. Collected, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub file: String,
    /// 1-based line, 0 when the error is not tied to a position
    pub line: usize,
    /// 1-based column, 0 when the error is not tied to a position
    pub column: usize,
    pub message: String,
    /// Offending source text
    pub text: String,
}

impl ParseError {
    /// Error that is not tied to a source position (read failures, setup)
    pub fn file_level(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: 0,
            column: 0,
            message: message.into(),
            text: String::new(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            return write!(f, "{}: {}", self.file, self.message);
        }
        write!(
            f,
            "{}:{}:{}: {}: {:?}",
            self.file, self.line, self.column, self.message, self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(literal: &str) -> Identifier {
        literal.parse().unwrap()
    }

    #[test]
    fn test_import_display() {
        assert_eq!(ImportStatement::new(id("a.B")).to_string(), "a.B");
        assert_eq!(ImportStatement::star(id("x.y.z")).to_string(), "x.y.z.*");
        assert_eq!(
            ImportStatement::aliased(id("c.D"), SimpleIdentifier::new("E").unwrap()).to_string(),
            "c.D as E"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let located = ParseError {
            file: "A.kt".to_string(),
            line: 3,
            column: 7,
            message: "syntax error".to_string(),
            text: "}}".to_string(),
        };
        assert_eq!(located.to_string(), "A.kt:3:7: syntax error: \"}}\"");
        assert_eq!(
            ParseError::file_level("B.kt", "unreadable").to_string(),
            "B.kt: unreadable"
        );
    }
}
