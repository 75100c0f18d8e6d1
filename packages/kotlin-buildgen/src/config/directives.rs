//! `# gazelle:<key> <value>` directives found in build files

use once_cell::sync::Lazy;
use regex::Regex;

static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*#[ \t]*gazelle:([A-Za-z0-9_]+)[ \t]*(.*?)[ \t]*$")
        .expect("directive regex is valid")
});

/// Enables/disables generation: `# gazelle:kotlin enabled|disabled`
pub const KOTLIN_EXTENSION: &str = "kotlin";
/// Replaces the test file suffixes: `# gazelle:kotlin_test_file_suffixes Test.kt,Spec.kt`
pub const KOTLIN_TEST_FILE_SUFFIXES: &str = "kotlin_test_file_suffixes";
/// Forces an import to a label: `# gazelle:resolve [src-lang] kotlin <import> <label>`
pub const RESOLVE: &str = "resolve";
/// Repository used for artifact labels: `# gazelle:java_maven_repository_name maven`
pub const JAVA_MAVEN_REPOSITORY_NAME: &str = "java_maven_repository_name";
/// Excludes an artifact from lookups: `# gazelle:java_exclude_artifact group:artifact`
pub const JAVA_EXCLUDE_ARTIFACT: &str = "java_exclude_artifact";

/// A single directive line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub value: String,
}

impl Directive {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Extract every directive from build file content, in file order.
pub fn parse_directives(content: &str) -> Vec<Directive> {
    DIRECTIVE
        .captures_iter(content)
        .map(|caps| Directive::new(&caps[1], &caps[2]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directives_in_order() {
        let content = r#"
# gazelle:kotlin disabled
load("@rules_kotlin//kotlin:jvm.bzl", "kt_jvm_library")
  #gazelle:resolve kotlin com.example //third_party:example
# not a directive
kt_jvm_library(name = "x")
"#;
        let directives = parse_directives(content);
        assert_eq!(
            directives,
            vec![
                Directive::new("kotlin", "disabled"),
                Directive::new("resolve", "kotlin com.example //third_party:example"),
            ]
        );
    }

    #[test]
    fn test_directive_without_value() {
        let directives = parse_directives("# gazelle:kotlin\n");
        assert_eq!(directives, vec![Directive::new("kotlin", "")]);
    }
}
