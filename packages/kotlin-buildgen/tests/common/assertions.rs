//! Assertions over run results

use kotlin_buildgen::features::rule_emission::domain::Rule;
use kotlin_buildgen::pipeline::DiagnosticKind;
use kotlin_buildgen::RunResult;
use pretty_assertions::assert_eq;

/// The rule `name` generated in directory `rel`
pub fn rule<'a>(result: &'a RunResult, rel: &str, name: &str) -> &'a Rule {
    let package = result
        .package(rel)
        .unwrap_or_else(|| panic!("no generated package //{rel}; result:\n{result}"));
    package
        .rule(name)
        .unwrap_or_else(|| panic!("no rule {name:?} in //{rel}; result:\n{result}"))
}

/// Assert the rendered `deps` of a rule; an empty slice means no `deps` attribute
pub fn assert_deps(result: &RunResult, rel: &str, name: &str, expected: &[&str]) {
    let rule = rule(result, rel, name);
    let deps: Vec<&str> = rule
        .attr_strings("deps")
        .map(|deps| deps.iter().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(deps, expected, "deps of //{rel}:{name}");
}

pub fn assert_no_diagnostics(result: &RunResult) {
    assert!(
        result.diagnostics.is_empty(),
        "Expected no diagnostics, got: {:#?}",
        result.diagnostics
    );
}

pub fn assert_diagnostic_count(result: &RunResult, kind: DiagnosticKind, expected: usize) {
    assert_eq!(
        result.diagnostics.count(kind),
        expected,
        "diagnostics: {:#?}",
        result.diagnostics
    );
}
