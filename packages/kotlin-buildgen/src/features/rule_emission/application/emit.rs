//! Turn the targets of one directory into rules

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::errors::{BuildgenError, Result};
use crate::features::rule_emission::domain::{AttrValue, EmptyRule, GenerateResult, Rule, RuleKind};
use crate::features::rule_emission::infrastructure::BuildFile;
use crate::features::targets::application::ClassifiedTargets;
use crate::features::targets::domain::{BinTarget, LibTarget, Target, TestTarget};

/// Name of the library rule of directory `rel`: the directory base name,
/// `root` at the repository root.
pub fn library_target_name(rel: &str) -> String {
    match rel.rsplit('/').next() {
        Some(base) if !base.is_empty() => base.to_string(),
        _ => "root".to_string(),
    }
}

/// `Main.kt` → `main_bin`
pub fn binary_target_name(main_file: &str) -> String {
    format!("{}_bin", file_stem(main_file).to_lowercase())
}

/// `FooTest.kt` → `footest`
pub fn test_target_name(test_file: &str) -> String {
    file_stem(test_file).to_lowercase()
}

fn file_stem(file: &str) -> &str {
    Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file)
}

/// Fail if `name` is taken by an existing rule of another kind
pub fn check_collision(
    rel: &str,
    name: &str,
    kind: RuleKind,
    existing: Option<&BuildFile>,
) -> Result<()> {
    let Some(file) = existing else {
        return Ok(());
    };
    match file.rule(name) {
        Some(rule) if rule.kind != kind.as_str() => Err(BuildgenError::RuleCollision {
            pkg: rel.to_string(),
            name: name.to_string(),
            existing_kind: rule.kind.clone(),
            generated_kind: kind.as_str().to_string(),
        }),
        _ => Ok(()),
    }
}

/// Build the rules of directory `rel`.
///
/// Every name is checked for collisions before any rule is produced.
pub fn emit_rules(
    rel: &str,
    targets: ClassifiedTargets,
    existing: Option<&BuildFile>,
) -> Result<GenerateResult> {
    let library_name = library_target_name(rel);
    check_collision(rel, &library_name, RuleKind::KtJvmLibrary, existing)?;

    let mut binaries: Vec<(String, BinTarget)> = targets
        .binaries
        .into_values()
        .map(|bin| (binary_target_name(&bin.file), bin))
        .collect();
    binaries.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, _) in &binaries {
        check_collision(rel, name, RuleKind::KtJvmBinary, existing)?;
    }

    let tests: Vec<(String, TestTarget)> = targets
        .tests
        .into_iter()
        .map(|test| {
            let name = test.files.first().map(|f| test_target_name(f)).unwrap_or_default();
            (name, test)
        })
        .collect();
    for (name, _) in &tests {
        check_collision(rel, name, RuleKind::KtJvmTest, existing)?;
    }

    let mut result = GenerateResult::default();
    add_library_rule(rel, library_name, targets.library, existing, &mut result);
    for (name, bin) in binaries {
        add_binary_rule(rel, name, bin, &mut result);
    }
    for (name, test) in tests {
        add_test_rule(rel, name, test, existing, &mut result);
    }
    Ok(result)
}

/// Marker deleting an existing rule of this name and kind, if there is one
fn deletion_marker(name: &str, kind: RuleKind, existing: Option<&BuildFile>) -> Option<EmptyRule> {
    existing?
        .rules
        .iter()
        .find(|r| r.name == name && r.kind == kind.as_str())
        .map(|_| EmptyRule {
            kind,
            name: name.to_string(),
        })
}

fn add_library_rule(
    rel: &str,
    name: String,
    target: LibTarget,
    existing: Option<&BuildFile>,
    result: &mut GenerateResult,
) {
    // Generate nothing if there are no source files, remove any existing rule
    if target.files.is_empty() {
        result
            .empty
            .extend(deletion_marker(&name, RuleKind::KtJvmLibrary, existing));
        return;
    }

    let mut rule = Rule::new(RuleKind::KtJvmLibrary, name);
    rule.set_attr(
        "srcs",
        AttrValue::List(target.files.iter().cloned().collect()),
    );
    rule.set_private(Arc::new(Target::Library(target)));

    info!("add rule '{}' '{}:{}'", rule.kind(), rel, rule.name());
    result.gen.push(rule);
}

fn add_binary_rule(rel: &str, name: String, target: BinTarget, result: &mut GenerateResult) {
    let stem = file_stem(&target.file);
    let main_class = match &target.package {
        Some(package) => format!("{}.{}", package, stem),
        None => stem.to_string(),
    };

    let mut rule = Rule::new(RuleKind::KtJvmBinary, name);
    rule.set_attr("srcs", AttrValue::List(vec![target.file.clone()]));
    rule.set_attr("main_class", AttrValue::String(main_class));
    rule.set_private(Arc::new(Target::Binary(target)));

    info!("add rule '{}' '{}:{}'", rule.kind(), rel, rule.name());
    result.gen.push(rule);
}

fn add_test_rule(
    rel: &str,
    name: String,
    target: TestTarget,
    existing: Option<&BuildFile>,
    result: &mut GenerateResult,
) {
    if target.files.is_empty() {
        result
            .empty
            .extend(deletion_marker(&name, RuleKind::KtJvmTest, existing));
        return;
    }

    let mut rule = Rule::new(RuleKind::KtJvmTest, name);
    rule.set_attr("srcs", AttrValue::List(target.files.clone()));
    if let Some(test_class) = &target.test_class {
        rule.set_attr("test_class", AttrValue::String(test_class.literal()));
    }
    rule.set_private(Arc::new(Target::Test(target)));

    info!("add rule '{}' '{}:{}'", rule.kind(), rel, rule.name());
    result.gen.push(rule);
}
