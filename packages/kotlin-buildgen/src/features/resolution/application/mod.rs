//! Resolution use cases

mod provides;
mod resolver;

pub use provides::{declare_provides, index_rules};
pub use resolver::{ImportResolver, ResolvedDeps};
