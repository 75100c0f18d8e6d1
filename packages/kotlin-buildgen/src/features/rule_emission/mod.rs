//! Rule Emission Feature
//!
//! Turns classified targets into rule descriptions: one create/update per
//! non-empty target, a deletion marker where a target lost all its files.
//!
//! ## Structure
//! - `domain/` - Rule, RuleKind, EmptyRule, GenerateResult
//! - `application/` - emit_rules, target naming, collision checks
//! - `infrastructure/` - BuildFile reader for existing build files

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports
pub use application::{emit_rules, library_target_name};
pub use domain::{AttrValue, EmptyRule, GenerateResult, Rule, RuleKind};
pub use infrastructure::{BuildFile, ExistingRule};
