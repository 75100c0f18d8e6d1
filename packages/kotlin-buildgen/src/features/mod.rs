//! Feature modules
//!
//! Leaf-first: `parsing` → `targets` → `resolution` / `rule_emission`.

pub mod parsing;
pub mod resolution;
pub mod rule_emission;
pub mod targets;
