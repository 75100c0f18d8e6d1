//! Tree-sitter Kotlin header parser
//!
//! This is where the tree-sitter dependency lives. Only the file header
//! (`package`, `import`) and top-level function names are read; bodies are
//! never inspected.

use tree_sitter::{Node as TSNode, Parser as TSParser};

use crate::features::parsing::domain::{ImportStatement, ParseError, ParseResult};
use crate::features::parsing::ports::Parser;
use crate::shared::models::{Identifier, SimpleIdentifier};

/// Kotlin parser backed by `tree-sitter-kotlin`
#[derive(Debug, Default, Clone, Copy)]
pub struct KotlinParser;

impl KotlinParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for KotlinParser {
    fn parse(&self, file_path: &str, source: &str) -> (ParseResult, Vec<ParseError>) {
        let mut result = ParseResult::new(file_path);
        let mut errors = Vec::new();

        let mut parser = TSParser::new();
        if let Err(e) = parser.set_language(&tree_sitter_kotlin::language()) {
            errors.push(ParseError::file_level(
                file_path,
                format!("Failed to set language: {}", e),
            ));
            return (result, errors);
        }

        let Some(tree) = parser.parse(source, None) else {
            errors.push(ParseError::file_level(
                file_path,
                "Failed to parse source code",
            ));
            return (result, errors);
        };

        let mut extractor = HeaderExtractor {
            file_path,
            source: source.as_bytes(),
            errors: &mut errors,
        };
        let root = tree.root_node();
        for node in named_children(root) {
            match node.kind() {
                "package_header" => extractor.read_package_header(node, &mut result),
                "import_list" => {
                    for header in named_children(node) {
                        if header.kind() == "import_header" {
                            extractor.read_import_header(header, &mut result);
                        }
                    }
                }
                "import_header" => extractor.read_import_header(node, &mut result),
                "function_declaration" => {
                    if extractor.function_name(node) == Some("main") {
                        result.has_main = true;
                    }
                }
                _ => {}
            }
        }

        if root.has_error() {
            extractor.collect_syntax_errors(root);
        }

        (result, errors)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "kt" | "kts")
    }
}

struct HeaderExtractor<'a> {
    file_path: &'a str,
    source: &'a [u8],
    errors: &'a mut Vec<ParseError>,
}

impl<'a> HeaderExtractor<'a> {
    fn text(&self, node: TSNode<'_>) -> &'a str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn error_at(&mut self, node: TSNode<'_>, message: impl Into<String>) {
        let position = node.start_position();
        self.errors.push(ParseError {
            file: self.file_path.to_string(),
            line: position.row + 1,
            column: position.column + 1,
            message: message.into(),
            text: self.text(node).to_string(),
        });
    }

    /// `package a.b.c`
    fn read_package_header(&mut self, node: TSNode<'_>, result: &mut ParseResult) {
        if result.package.is_some() {
            self.error_at(
                node,
                format!("multiple package declarations found in {:?}", self.file_path),
            );
            return;
        }
        let Some(identifier_node) = first_named_child_of_kind(node, "identifier") else {
            self.error_at(node, "package header without identifier");
            return;
        };
        result.package = self.read_identifier(identifier_node);
    }

    /// `import a.b.C`, `import a.b.*` or `import a.b.C as D`
    fn read_import_header(&mut self, node: TSNode<'_>, result: &mut ParseResult) {
        let Some(identifier_node) = first_named_child_of_kind(node, "identifier") else {
            self.error_at(node, "import header without identifier");
            return;
        };
        let Some(identifier) = self.read_identifier(identifier_node) else {
            return;
        };

        if let Some(alias_node) = first_named_child_of_kind(node, "import_alias") {
            let alias = named_children(alias_node)
                .into_iter()
                .find(|n| matches!(n.kind(), "type_identifier" | "simple_identifier"))
                .map(|n| SimpleIdentifier::from_source(self.text(n)));
            match alias {
                Some(alias) => result
                    .imports
                    .push(ImportStatement::aliased(identifier, alias)),
                None => self.error_at(alias_node, "import alias without identifier"),
            }
            return;
        }

        // The wildcard is an anonymous `.*` token after the identifier
        let is_star = all_children(node)
            .into_iter()
            .any(|n| matches!(n.kind(), ".*" | "*" | "wildcard_import"));
        if is_star {
            result.imports.push(ImportStatement::star(identifier));
        } else {
            result.imports.push(ImportStatement::new(identifier));
        }
    }

    /// An `identifier` node is `simple_identifier ('.' simple_identifier)*`,
    /// possibly with comments in between.
    fn read_identifier(&mut self, node: TSNode<'_>) -> Option<Identifier> {
        let mut parts = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "simple_identifier" => parts.push(SimpleIdentifier::from_source(self.text(child))),
                _ if child.is_extra() => {}
                other => {
                    self.error_at(
                        node,
                        format!("unexpected node type {:?} within identifier", other),
                    );
                    return None;
                }
            }
        }

        match Identifier::new(parts) {
            Ok(identifier) => Some(identifier),
            Err(e) => {
                self.error_at(node, e.to_string());
                None
            }
        }
    }

    fn function_name(&self, node: TSNode<'_>) -> Option<&'a str> {
        first_named_child_of_kind(node, "simple_identifier").map(|n| self.text(n))
    }

    fn collect_syntax_errors(&mut self, node: TSNode<'_>) {
        if node.is_missing() {
            self.error_at(node, format!("missing {}", node.kind()));
        } else if node.is_error() {
            self.error_at(node, "syntax error");
            // The error node's text already covers its children
            return;
        }

        for child in all_children(node) {
            if child.has_error() || child.is_missing() {
                self.collect_syntax_errors(child);
            }
        }
    }
}

fn named_children(node: TSNode<'_>) -> Vec<TSNode<'_>> {
    (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .collect()
}

fn all_children(node: TSNode<'_>) -> Vec<TSNode<'_>> {
    (0..node.child_count()).filter_map(|i| node.child(i)).collect()
}

fn first_named_child_of_kind<'t>(node: TSNode<'t>, kind: &str) -> Option<TSNode<'t>> {
    named_children(node).into_iter().find(|n| n.kind() == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Comparable {
        package: String,
        imports: Vec<(String, bool, String)>,
        has_main: bool,
    }

    fn parse(source: &str) -> Comparable {
        let (result, _) = KotlinParser::new().parse("test.kt", source);
        Comparable {
            package: result
                .package
                .as_ref()
                .map(Identifier::literal)
                .unwrap_or_default(),
            imports: result
                .imports
                .iter()
                .map(|i| {
                    (
                        i.identifier().literal(),
                        i.is_star_import(),
                        i.alias().map(|a| a.literal().to_string()).unwrap_or_default(),
                    )
                })
                .collect(),
            has_main: result.has_main,
        }
    }

    fn imp(identifier: &str, star: bool, alias: &str) -> (String, bool, String) {
        (identifier.to_string(), star, alias.to_string())
    }

    #[test]
    fn test_star_import() {
        let got = parse("package a.b.c\n\nimport  x.y.z.* \n\t\t");
        assert_eq!(
            got,
            Comparable {
                package: "a.b.c".to_string(),
                imports: vec![imp("x.y.z", true, "")],
                has_main: false,
            }
        );
    }

    #[test]
    fn test_aliased_imports() {
        let got = parse(
            "package hey.there\n\nimport com.example.foo.Bar as MyBar\nimport com.example.foo.Bar as /*x*/MyBar2\n",
        );
        assert_eq!(got.package, "hey.there");
        assert_eq!(
            got.imports,
            vec![
                imp("com.example.foo.Bar", false, "MyBar"),
                imp("com.example.foo.Bar", false, "MyBar2"),
            ]
        );
    }

    #[test]
    fn test_empty_file() {
        let (result, errors) = KotlinParser::new().parse("empty.kt", "");
        assert_eq!(result, ParseResult::new("empty.kt"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_imports_without_package() {
        let got = parse("\nimport a.B\nimport c.D as E\n\t");
        assert_eq!(got.package, "");
        assert_eq!(got.imports, vec![imp("a.B", false, ""), imp("c.D", false, "E")]);
    }

    #[test]
    fn test_comments_everywhere() {
        let got = parse(
            r#"
/*dlfkj*/package /*dlfkj*/ x // x
//z
import a.B // y
//z

/* asdf */ import /* asdf */ c.D // w
import /* fdsa */ d/* asdf */.* // w
"#,
        );
        assert_eq!(got.package, "x");
        assert_eq!(
            got.imports,
            vec![imp("a.B", false, ""), imp("c.D", false, ""), imp("d", true, "")]
        );
    }

    #[test]
    fn test_value_class_has_no_imports() {
        let got = parse("\n@JvmInline\nvalue class Password(private val s: String)\n");
        assert!(got.imports.is_empty());
        assert_eq!(got.package, "");
    }

    #[test]
    fn test_main_detection() {
        assert!(parse("fun main() {}").has_main);
        assert!(parse("\npackage my.demo\nfun main() {}\n").has_main);
        assert!(parse("\npackage my.demo\nimport kotlin.text.*\nfun main() {}\n").has_main);
        assert!(!parse("\npackage my.demo\nfun notMain() {}\n").has_main);
    }

    #[test]
    fn test_backtick_components_normalized() {
        let got = parse("package `a`.b\nimport `c`.d\n");
        assert_eq!(got.package, "a.b");
        assert_eq!(got.imports, vec![imp("c.d", false, "")]);
    }

    #[test]
    fn test_syntax_errors_are_collected() {
        let (result, errors) =
            KotlinParser::new().parse("broken.kt", "package a.b\nimport c.D\nclass {{{ \n");
        assert_eq!(result.package.map(|p| p.literal()), Some("a.b".to_string()));
        assert!(!errors.is_empty());
        assert!(errors.iter().all(|e| e.file == "broken.kt" && e.line >= 1));
    }

    #[test]
    fn test_supports_extension() {
        let parser = KotlinParser::new();
        assert!(parser.supports_extension("kt"));
        assert!(parser.supports_extension("kts"));
        assert!(!parser.supports_extension("java"));
    }
}
