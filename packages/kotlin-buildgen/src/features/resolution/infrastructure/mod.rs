//! Index, artifact manager and standard library implementations

pub mod maven_install;
pub mod native;
pub mod rule_index;

pub use maven_install::{coordinate_to_target_name, MavenInstallResolver};
pub use native::{is_java_stdlib, is_native_import, StdlibPredicate};
pub use rule_index::{RuleIndex, RuleIndexBuilder};
