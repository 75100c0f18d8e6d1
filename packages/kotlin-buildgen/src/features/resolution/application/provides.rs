//! Indexing pass

use tracing::debug;

use crate::config::LANGUAGE_NAME;
use crate::features::resolution::domain::ImportSpec;
use crate::features::resolution::infrastructure::{RuleIndex, RuleIndexBuilder};
use crate::features::rule_emission::domain::Rule;
use crate::shared::models::Label;

/// Import specs `rule` can satisfy: the declared packages of a library, sorted.
/// Binaries, tests and rules without target data provide nothing.
pub fn declare_provides(rule: &Rule) -> Vec<ImportSpec> {
    let Some(target) = rule.private() else {
        return Vec::new();
    };
    let mut provides: Vec<ImportSpec> = target
        .provided_packages()
        .into_iter()
        .map(|pkg| ImportSpec::new(LANGUAGE_NAME, pkg))
        .collect();
    provides.sort();
    provides
}

/// Build the read-only index over every generated rule
pub fn index_rules<'r, I>(rules: I) -> RuleIndex
where
    I: IntoIterator<Item = (Label, &'r Rule)>,
{
    let mut builder = RuleIndexBuilder::new();
    for (label, rule) in rules {
        builder.add_rule(&label, declare_provides(rule));
    }
    let index = builder.finish();
    debug!(
        rules = index.rule_count(),
        specs = index.spec_count(),
        "Rule index built"
    );
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::resolution::ports::ProviderIndex;
    use crate::features::rule_emission::domain::RuleKind;
    use crate::features::targets::domain::{BinTarget, LibTarget, Target};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn test_only_libraries_declare_packages() {
        let mut lib = LibTarget::new();
        lib.add_file("A.kt");
        lib.add_package("com.b".parse().unwrap());
        lib.add_package("com.a".parse().unwrap());
        let mut lib_rule = Rule::new(RuleKind::KtJvmLibrary, "lib");
        lib_rule.set_private(Arc::new(Target::Library(lib)));

        let mut bin_rule = Rule::new(RuleKind::KtJvmBinary, "main_bin");
        bin_rule.set_private(Arc::new(Target::Binary(BinTarget::new(
            "Main.kt",
            Some("com.a".parse().unwrap()),
        ))));

        assert_eq!(
            declare_provides(&lib_rule),
            vec![
                ImportSpec::new("kotlin", "com.a"),
                ImportSpec::new("kotlin", "com.b"),
            ]
        );
        assert!(declare_provides(&bin_rule).is_empty());
        assert!(declare_provides(&Rule::new(RuleKind::KtJvmLibrary, "bare")).is_empty());

        let lib_label = Label::new("", "lib", "lib");
        let index = index_rules(vec![
            (lib_label.clone(), &lib_rule),
            (Label::new("", "lib", "main_bin"), &bin_rule),
        ]);
        assert_eq!(index.rule_count(), 2);
        assert_eq!(
            index
                .find_providers(&ImportSpec::new("kotlin", "com.a"))
                .into_iter()
                .map(|r| r.label)
                .collect::<Vec<_>>(),
            vec![lib_label]
        );
    }
}
