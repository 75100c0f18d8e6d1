//! Per-directory Kotlin configuration tree
//!
//! One [`KotlinConfig`] snapshot exists per directory. A child is created from
//! its parent with [`KotlinConfig::new_child`], which copies the scalar
//! settings and shares the list-valued settings through `Arc`. Directives in
//! the child's build file are applied to the child before it is frozen into
//! [`Configs`]; a parent is never modified after its children exist.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::directives::{
    Directive, JAVA_EXCLUDE_ARTIFACT, JAVA_MAVEN_REPOSITORY_NAME, KOTLIN_EXTENSION,
    KOTLIN_TEST_FILE_SUFFIXES, RESOLVE,
};
use super::error::{ConfigError, ConfigResult};
use crate::shared::models::Label;

/// Language name used in import specs and `resolve` directives
pub const LANGUAGE_NAME: &str = "kotlin";

/// Default repository name of the maven artifacts
pub const DEFAULT_MAVEN_REPOSITORY_NAME: &str = "maven";

/// A `# gazelle:resolve` override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOverride {
    /// Source language of the importing file, `None` matches any
    pub src_lang: Option<String>,
    /// Language of the import spec
    pub lang: String,
    /// Exact import literal
    pub imp: String,
    pub label: Label,
}

/// JVM settings shared with the Java extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaConfig {
    maven_repository_name: String,
    excluded_artifacts: Arc<BTreeSet<String>>,
}

impl JavaConfig {
    pub fn maven_repository_name(&self) -> &str {
        &self.maven_repository_name
    }

    pub fn excluded_artifacts(&self) -> &BTreeSet<String> {
        &self.excluded_artifacts
    }
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            maven_repository_name: DEFAULT_MAVEN_REPOSITORY_NAME.to_string(),
            excluded_artifacts: Arc::new(BTreeSet::new()),
        }
    }
}

/// Configuration snapshot for one directory
#[derive(Debug, Clone)]
pub struct KotlinConfig {
    rel: String,
    parent: Option<Arc<KotlinConfig>>,

    generation_enabled: bool,
    test_file_suffixes: Arc<[String]>,
    overrides: Arc<Vec<ResolveOverride>>,
    java: JavaConfig,
}

impl KotlinConfig {
    /// Root configuration with the default conventions
    pub fn new() -> Self {
        Self {
            rel: String::new(),
            parent: None,
            generation_enabled: true,
            test_file_suffixes: Arc::from(vec!["Test.kt".to_string()]),
            overrides: Arc::new(Vec::new()),
            java: JavaConfig::default(),
        }
    }

    /// Create the configuration of the subdirectory `child_rel`, inheriting
    /// every setting of `parent`.
    pub fn new_child(parent: &Arc<KotlinConfig>, child_rel: impl Into<String>) -> Self {
        Self {
            rel: child_rel.into(),
            parent: Some(Arc::clone(parent)),
            generation_enabled: parent.generation_enabled,
            test_file_suffixes: Arc::clone(&parent.test_file_suffixes),
            overrides: Arc::clone(&parent.overrides),
            java: parent.java.clone(),
        }
    }

    pub fn with_generation_enabled(mut self, enabled: bool) -> Self {
        self.generation_enabled = enabled;
        self
    }

    pub fn with_test_file_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.test_file_suffixes = Arc::from(suffixes);
        self
    }

    /// Repository-relative directory of this configuration ("" at the root)
    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn parent(&self) -> Option<&Arc<KotlinConfig>> {
        self.parent.as_ref()
    }

    /// Whether rules are generated in this directory
    pub fn generation_enabled(&self) -> bool {
        self.generation_enabled
    }

    pub fn test_file_suffixes(&self) -> &[String] {
        &self.test_file_suffixes
    }

    pub fn java(&self) -> &JavaConfig {
        &self.java
    }

    /// Reports if the given base name within this directory should be
    /// considered a test.
    pub fn is_test_base_name(&self, base_name: &str) -> bool {
        self.test_file_suffixes
            .iter()
            .any(|suffix| base_name.ends_with(suffix.as_str()))
    }

    /// The override for `imp` in language `lang`, if any. Directives closer
    /// to this directory win over inherited ones.
    pub fn find_override(&self, imp: &str, lang: &str) -> Option<&Label> {
        self.overrides
            .iter()
            .rev()
            .find(|o| {
                o.imp == imp
                    && o.lang == lang
                    && o.src_lang.as_deref().map_or(true, |src| src == LANGUAGE_NAME)
            })
            .map(|o| &o.label)
    }

    /// Apply the directives of this directory's build file.
    ///
    /// Unknown directives belong to other extensions and are ignored.
    pub fn apply_directives(&mut self, directives: &[Directive]) -> ConfigResult<()> {
        for directive in directives {
            let value = directive.value.trim();
            match directive.key.as_str() {
                KOTLIN_EXTENSION => {
                    self.generation_enabled = match value {
                        "enabled" | "true" | "" => true,
                        "disabled" | "false" => false,
                        _ => {
                            return Err(self.invalid(directive, "expected 'enabled' or 'disabled'"))
                        }
                    };
                }
                KOTLIN_TEST_FILE_SUFFIXES => {
                    let suffixes: Vec<String> = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                    if suffixes.is_empty() {
                        return Err(self.invalid(directive, "expected a comma-separated list"));
                    }
                    self.test_file_suffixes = Arc::from(suffixes);
                }
                RESOLVE => {
                    let fields: Vec<&str> = value.split_whitespace().collect();
                    let (src_lang, lang, imp, label) = match fields.as_slice() {
                        [lang, imp, label] => (None, *lang, *imp, *label),
                        [src_lang, lang, imp, label] => {
                            (Some(src_lang.to_string()), *lang, *imp, *label)
                        }
                        _ => {
                            return Err(self.invalid(
                                directive,
                                "expected '[src-lang] lang import-string label'",
                            ))
                        }
                    };
                    let label = Label::parse_relative(label, &self.rel)?;
                    Arc::make_mut(&mut self.overrides).push(ResolveOverride {
                        src_lang,
                        lang: lang.to_string(),
                        imp: imp.to_string(),
                        label,
                    });
                }
                JAVA_MAVEN_REPOSITORY_NAME => {
                    if value.is_empty() {
                        return Err(self.invalid(directive, "expected a repository name"));
                    }
                    self.java.maven_repository_name = value.to_string();
                }
                JAVA_EXCLUDE_ARTIFACT => {
                    if !value.contains(':') {
                        return Err(self.invalid(directive, "expected 'group:artifact'"));
                    }
                    Arc::make_mut(&mut self.java.excluded_artifacts).insert(value.to_string());
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn invalid(&self, directive: &Directive, reason: &str) -> ConfigError {
        ConfigError::invalid_directive(
            &directive.key,
            &directive.value,
            format!("//{}", self.rel),
            reason,
        )
    }
}

impl Default for KotlinConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for KotlinConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(KotlinConfig {:?}: enabled={}; test_suffixes={:?}; overrides={})",
            self.rel,
            self.generation_enabled,
            self.test_file_suffixes,
            self.overrides.len()
        )
    }
}

/// All directory configurations of a run, keyed by repository-relative path
#[derive(Debug, Clone, Default)]
pub struct Configs {
    by_rel: HashMap<String, Arc<KotlinConfig>>,
}

impl Configs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze `config` and register it under its directory.
    pub fn insert(&mut self, config: KotlinConfig) -> Arc<KotlinConfig> {
        let config = Arc::new(config);
        self.by_rel
            .insert(config.rel.clone(), Arc::clone(&config));
        config
    }

    pub fn get(&self, rel: &str) -> Option<&Arc<KotlinConfig>> {
        self.by_rel.get(rel)
    }

    /// The configuration of the directory containing `rel`
    pub fn parent_for_package(&self, rel: &str) -> Option<&Arc<KotlinConfig>> {
        if rel.is_empty() {
            return None;
        }
        let dir = Path::new(rel)
            .parent()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        self.by_rel.get(&dir)
    }

    pub fn len(&self) -> usize {
        self.by_rel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_rel.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_test_suffix() {
        let config = KotlinConfig::new();
        assert!(config.is_test_base_name("FooTest.kt"));
        assert!(!config.is_test_base_name("Foo.kt"));
        assert!(config.generation_enabled());
    }

    #[test]
    fn test_child_inherits_and_parent_is_unchanged() {
        let mut configs = Configs::new();
        let mut root = KotlinConfig::new();
        root.apply_directives(&[Directive::new(
            "resolve",
            "kotlin com.example //third_party:example",
        )])
        .unwrap();
        let root = configs.insert(root);

        let mut child = KotlinConfig::new_child(&root, "src");
        child
            .apply_directives(&[
                Directive::new("kotlin", "disabled"),
                Directive::new("kotlin_test_file_suffixes", "Spec.kt, Test.kt"),
                Directive::new("resolve", "kotlin com.other :local"),
                Directive::new("java_exclude_artifact", "com.google.guava:guava"),
            ])
            .unwrap();
        let child = configs.insert(child);

        assert!(!child.generation_enabled());
        assert!(child.is_test_base_name("FooSpec.kt"));
        assert_eq!(
            child.find_override("com.example", "kotlin"),
            Some(&Label::new("", "third_party", "example"))
        );
        assert_eq!(
            child.find_override("com.other", "kotlin"),
            Some(&Label::new("", "src", "local"))
        );
        assert!(child
            .java()
            .excluded_artifacts()
            .contains("com.google.guava:guava"));

        assert!(root.generation_enabled());
        assert!(!root.is_test_base_name("FooSpec.kt"));
        assert_eq!(root.find_override("com.other", "kotlin"), None);
        assert!(root.java().excluded_artifacts().is_empty());
        assert_eq!(child.parent().map(|p| p.rel()), Some(""));
    }

    #[test]
    fn test_closest_override_wins() {
        let mut configs = Configs::new();
        let mut root = KotlinConfig::new();
        root.apply_directives(&[Directive::new("resolve", "kotlin a.b //x:old")])
            .unwrap();
        let root = configs.insert(root);
        let mut child = KotlinConfig::new_child(&root, "pkg");
        child
            .apply_directives(&[Directive::new("resolve", "kotlin kotlin a.b //x:new")])
            .unwrap();

        assert_eq!(
            child.find_override("a.b", "kotlin"),
            Some(&Label::new("", "x", "new"))
        );
        assert_eq!(child.find_override("a.b", "java"), None);
    }

    #[test]
    fn test_override_for_other_source_language_ignored() {
        let mut config = KotlinConfig::new();
        config
            .apply_directives(&[Directive::new("resolve", "java kotlin a.b //x:y")])
            .unwrap();
        assert_eq!(config.find_override("a.b", "kotlin"), None);
    }

    #[test]
    fn test_invalid_directives() {
        let mut config = KotlinConfig::new();
        assert!(matches!(
            config.apply_directives(&[Directive::new("kotlin", "maybe")]),
            Err(ConfigError::InvalidDirective { .. })
        ));
        assert!(config
            .apply_directives(&[Directive::new("resolve", "kotlin only-two")])
            .is_err());
        assert!(matches!(
            config.apply_directives(&[Directive::new("resolve", "kotlin a.b not-a-label")]),
            Err(ConfigError::Label(_))
        ));
        // other extensions' directives are ignored
        assert!(config
            .apply_directives(&[Directive::new("go_prefix", "example.com/x")])
            .is_ok());
    }

    #[test]
    fn test_parent_for_package() {
        let mut configs = Configs::new();
        let root = configs.insert(KotlinConfig::new());
        let a = configs.insert(KotlinConfig::new_child(&root, "a"));
        configs.insert(KotlinConfig::new_child(&a, "a/b"));

        assert_eq!(configs.parent_for_package("a/b").map(|c| c.rel()), Some("a"));
        assert_eq!(configs.parent_for_package("a").map(|c| c.rel()), Some(""));
        assert!(configs.parent_for_package("").is_none());
    }
}
