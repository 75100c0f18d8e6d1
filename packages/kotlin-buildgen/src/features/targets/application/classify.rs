//! Group the parsed files of a directory into targets

use std::collections::BTreeMap;
use std::path::Path;

use tracing::trace;

use crate::config::KotlinConfig;
use crate::features::parsing::domain::ParseResult;
use crate::features::targets::domain::{BinTarget, KotlinTarget, LibTarget, TestTarget};
use crate::shared::models::{Identifier, SimpleIdentifier};

/// Targets of one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedTargets {
    pub library: LibTarget,
    /// Binaries keyed by file name
    pub binaries: BTreeMap<String, BinTarget>,
    /// Tests sorted by their first file
    pub tests: Vec<TestTarget>,
}

/// Partition parsed files into one library, one binary per `main` file and
/// one test per test file.
///
/// A test suffix match wins over a `main` function; everything else is
/// folded into the library.
pub fn classify_files<I>(config: &KotlinConfig, parses: I) -> ClassifiedTargets
where
    I: IntoIterator<Item = ParseResult>,
{
    let mut targets = ClassifiedTargets::default();

    for parse in parses {
        let base_name = Path::new(&parse.file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&parse.file)
            .to_string();

        let target: &mut KotlinTarget = if config.is_test_base_name(&base_name) {
            trace!(file = %parse.file, "classified as test");
            let test_class = guess_class_name(&parse);
            targets.tests.push(TestTarget::new(
                vec![parse.file.clone()],
                parse.package.clone(),
                test_class,
            ));
            let last = targets.tests.len() - 1;
            &mut targets.tests[last].base
        } else if parse.has_main {
            trace!(file = %parse.file, "classified as binary");
            &mut targets
                .binaries
                .entry(parse.file.clone())
                .or_insert_with(|| BinTarget::new(parse.file.clone(), parse.package.clone()))
                .base
        } else {
            targets.library.add_file(parse.file.clone());
            if let Some(package) = &parse.package {
                targets.library.add_package(package.clone());
            }
            &mut targets.library.base
        };

        for import in parse.imports {
            target.add_import(import, &parse.file);
        }
    }

    targets.tests.sort_by(|a, b| a.files.first().cmp(&b.files.first()));
    targets
}

/// The class a test file is expected to declare: its package plus the file
/// stem. `None` when the stem is not a plain identifier.
pub fn guess_class_name(parse: &ParseResult) -> Option<Identifier> {
    let base = Path::new(&parse.file).file_name()?.to_str()?;
    let stem = base
        .strip_suffix(".kts")
        .or_else(|| base.strip_suffix(".kt"))
        .unwrap_or(base);
    let class = SimpleIdentifier::new(stem).ok()?;
    Some(match &parse.package {
        Some(package) => package.child(class),
        None => Identifier::simple(class),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::ImportStatement;
    use pretty_assertions::assert_eq;

    fn id(literal: &str) -> Identifier {
        literal.parse().unwrap()
    }

    fn file(name: &str, package: &str, imports: &[&str]) -> ParseResult {
        imports.iter().fold(
            ParseResult::new(name).with_package(id(package)),
            |r, imp| r.with_import(ImportStatement::new(id(imp))),
        )
    }

    #[test]
    fn test_library_gets_plain_files() {
        let targets = classify_files(
            &KotlinConfig::new(),
            vec![
                file("A.kt", "com.a", &["x.Y"]),
                file("B.kt", "com.b", &["x.Y", "z.W"]),
            ],
        );

        assert_eq!(
            targets.library.files.iter().cloned().collect::<Vec<_>>(),
            vec!["A.kt", "B.kt"]
        );
        assert_eq!(
            targets.library.packages.keys().cloned().collect::<Vec<_>>(),
            vec!["com.a", "com.b"]
        );
        assert_eq!(targets.library.base.import_count(), 2);
        assert!(targets.binaries.is_empty());
        assert!(targets.tests.is_empty());
    }

    #[test]
    fn test_suffix_wins_over_main() {
        let targets = classify_files(
            &KotlinConfig::new(),
            vec![
                file("FooTest.kt", "com.a", &["org.junit.Test"]).with_main(),
                file("Main.kt", "com.a", &[]).with_main(),
            ],
        );

        assert_eq!(targets.tests.len(), 1);
        assert_eq!(targets.tests[0].files, vec!["FooTest.kt"]);
        assert_eq!(
            targets.tests[0].test_class.as_ref().map(Identifier::literal),
            Some("com.a.FooTest".to_string())
        );
        assert!(targets.tests[0].base.import("org.junit.Test").is_some());

        assert_eq!(targets.binaries.len(), 1);
        assert!(targets.binaries.contains_key("Main.kt"));
        assert!(targets.library.is_empty());
    }

    #[test]
    fn test_tests_are_sorted_by_file() {
        let targets = classify_files(
            &KotlinConfig::new(),
            vec![
                file("ZTest.kt", "t", &[]),
                file("ATest.kt", "t", &[]),
            ],
        );
        let order: Vec<_> = targets.tests.iter().map(|t| t.files[0].clone()).collect();
        assert_eq!(order, vec!["ATest.kt", "ZTest.kt"]);
    }

    #[test]
    fn test_configured_suffixes() {
        let config = KotlinConfig::new().with_test_file_suffixes(vec!["Spec.kt".to_string()]);
        let targets = classify_files(
            &config,
            vec![file("FooSpec.kt", "s", &[]), file("FooTest.kt", "s", &[])],
        );
        assert_eq!(targets.tests.len(), 1);
        assert!(targets.library.files.contains("FooTest.kt"));
    }

    #[test]
    fn test_guess_class_name() {
        assert_eq!(
            guess_class_name(&ParseResult::new("BarTest.kt").with_package(id("a.b")))
                .map(|i| i.literal()),
            Some("a.b.BarTest".to_string())
        );
        assert_eq!(
            guess_class_name(&ParseResult::new("BarTest.kt")).map(|i| i.literal()),
            Some("BarTest".to_string())
        );
        assert_eq!(guess_class_name(&ParseResult::new("bar-test.kt")), None);
    }
}
