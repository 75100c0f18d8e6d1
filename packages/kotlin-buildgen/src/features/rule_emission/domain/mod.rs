//! Rule descriptions

mod rule;

pub use rule::{AttrValue, EmptyRule, GenerateResult, Rule, RuleKind};
