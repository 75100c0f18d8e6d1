//! Pipeline orchestration

pub mod diagnostics;
pub mod generate;
pub mod orchestrator;
pub mod result;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use generate::{generate_package, PackageGeneration};
pub use orchestrator::Generator;
pub use result::{PackageResult, RunResult};
