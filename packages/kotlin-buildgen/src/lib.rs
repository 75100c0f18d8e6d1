/*
 * kotlin-buildgen - Bazel build file generation for Kotlin
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Identifier, Label)
 * - config/      : Run configuration and the per-directory config tree
 * - features/    : Vertical slices (parsing → targets → resolution → rule_emission)
 * - pipeline/    : Orchestration
 *
 * Parallelism:
 * - Rayon pool per directory for parsing
 * - Rayon work-stealing across directories for resolution
 */

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{KotlinConfig, RunConfig};
pub use errors::{BuildgenError, Result};
pub use features::parsing::{ImportStatement, KotlinParser, ParseError, ParseResult, Parser};
pub use features::resolution::{ImportResolver, ResolutionOutcome};
pub use pipeline::{Diagnostics, Generator, RunResult};
pub use shared::models::{Identifier, Label, SimpleIdentifier};
