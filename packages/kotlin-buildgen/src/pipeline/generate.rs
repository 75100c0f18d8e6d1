//! Rule generation for one directory: collect → parse → classify → emit

use std::path::Path;

use tracing::{trace, warn};

use super::diagnostics::Diagnostic;
use crate::config::KotlinConfig;
use crate::errors::Result;
use crate::features::parsing::application::{collect_source_files, parse_files};
use crate::features::parsing::ports::Parser;
use crate::features::rule_emission::application::emit_rules;
use crate::features::rule_emission::domain::GenerateResult;
use crate::features::rule_emission::infrastructure::BuildFile;
use crate::features::targets::application::classify_files;

/// Generated rules of a directory and the parse diagnostics found on the way
#[derive(Debug, Default)]
pub struct PackageGeneration {
    pub result: GenerateResult,
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate the rules of directory `dir` (repository-relative `rel`).
///
/// A disabled directory yields nothing; its rules are left alone.
pub fn generate_package<P: Parser + ?Sized>(
    parser: &P,
    dir: &Path,
    config: &KotlinConfig,
    existing: Option<&BuildFile>,
    max_workers: usize,
) -> Result<PackageGeneration> {
    let rel = config.rel();
    if !config.generation_enabled() {
        trace!(rel, "generation disabled");
        return Ok(PackageGeneration::default());
    }
    trace!(rel, %config, "generating");

    let files = collect_source_files(dir, parser)?;
    let parsed = parse_files(parser, dir, &files, max_workers)?;

    let mut diagnostics = Vec::new();
    let mut results = Vec::with_capacity(parsed.len());
    for file_parse in parsed {
        for error in &file_parse.errors {
            warn!(rel, "{}", error);
            diagnostics.push(Diagnostic::parse_error(rel, error));
        }
        results.push(file_parse.result);
    }

    let targets = classify_files(config, results);
    let result = emit_rules(rel, targets, existing)?;
    Ok(PackageGeneration {
        result,
        diagnostics,
    })
}
