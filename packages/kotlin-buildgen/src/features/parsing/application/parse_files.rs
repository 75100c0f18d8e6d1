//! Parse all Kotlin files of one directory
//!
//! Fan-out/fan-in over a bounded worker pool: the dispatcher fills the work
//! queue and closes it, each worker pulls paths until the queue is drained,
//! and the results queue closes once the last worker returns.

use std::path::Path;
use std::sync::mpsc;

use parking_lot::Mutex;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::errors::{BuildgenError, Result};
use crate::features::parsing::domain::{ParseError, ParseResult};
use crate::features::parsing::ports::Parser;

/// Parse output of a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileParse {
    pub result: ParseResult,
    pub errors: Vec<ParseError>,
}

/// Number of parse workers for `file_count` files
pub fn worker_count(file_count: usize, max_workers: usize) -> usize {
    max_workers.max(1).min(1 + file_count / 2)
}

/// Base names of the source files directly inside `dir`, sorted
pub fn collect_source_files<P: Parser + ?Sized>(dir: &Path, parser: &P) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| parser.supports_extension(ext));
        if supported {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.push(name.to_string());
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Parse `file_names` (relative to `dir`) on a pool of at most `max_workers`
/// threads. Results are sorted by file name.
pub fn parse_files<P: Parser + ?Sized>(
    parser: &P,
    dir: &Path,
    file_names: &[String],
    max_workers: usize,
) -> Result<Vec<FileParse>> {
    if file_names.is_empty() {
        return Ok(Vec::new());
    }

    let workers = worker_count(file_names.len(), max_workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("kotlin-parse-{}", i))
        .build()
        .map_err(|e| BuildgenError::parse(format!("Failed to build parse pool: {}", e)))?;
    debug!(
        dir = %dir.display(),
        files = file_names.len(),
        workers,
        "Parsing directory"
    );

    let (work_tx, work_rx) = mpsc::channel::<&str>();
    for name in file_names {
        // The receiver outlives this loop
        let _ = work_tx.send(name.as_str());
    }
    drop(work_tx);
    let work_rx = Mutex::new(work_rx);

    let (result_tx, result_rx) = mpsc::channel::<FileParse>();
    let mut parsed = Vec::with_capacity(file_names.len());

    pool.in_place_scope(|scope| {
        for _ in 0..workers {
            let result_tx = result_tx.clone();
            let work_rx = &work_rx;
            scope.spawn(move |_| loop {
                let next = work_rx.lock().recv();
                let Ok(name) = next else {
                    break;
                };
                let _ = result_tx.send(parse_one(parser, dir, name));
            });
        }
        drop(result_tx);

        for file_parse in result_rx.iter() {
            trace!(file = %file_parse.result.file, "Parsed");
            parsed.push(file_parse);
        }
    });

    parsed.sort_by(|a, b| a.result.file.cmp(&b.result.file));
    Ok(parsed)
}

fn parse_one<P: Parser + ?Sized>(parser: &P, dir: &Path, name: &str) -> FileParse {
    match std::fs::read_to_string(dir.join(name)) {
        Ok(source) => {
            let (result, errors) = parser.parse(name, &source);
            FileParse { result, errors }
        }
        Err(e) => FileParse {
            result: ParseResult::new(name),
            errors: vec![ParseError::file_level(
                name,
                format!("failed to read file: {}", e),
            )],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::ImportStatement;
    use std::fs;
    use tempfile::TempDir;

    /// Reads `package <x>` from the first line, nothing else
    struct FirstLineParser;

    impl Parser for FirstLineParser {
        fn parse(&self, file_path: &str, source: &str) -> (ParseResult, Vec<ParseError>) {
            let mut result = ParseResult::new(file_path);
            if let Some(pkg) = source.lines().next().and_then(|l| l.strip_prefix("package ")) {
                result = result
                    .with_package(pkg.parse().unwrap())
                    .with_import(ImportStatement::new(pkg.parse().unwrap()));
            }
            (result, Vec::new())
        }

        fn supports_extension(&self, ext: &str) -> bool {
            ext == "kt"
        }
    }

    #[test]
    fn test_worker_count() {
        assert_eq!(worker_count(0, 12), 1);
        assert_eq!(worker_count(1, 12), 1);
        assert_eq!(worker_count(4, 12), 3);
        assert_eq!(worker_count(100, 12), 12);
        assert_eq!(worker_count(100, 0), 1);
    }

    #[test]
    fn test_collect_source_files_is_flat_and_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("B.kt"), "").unwrap();
        fs::write(dir.path().join("A.kt"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/C.kt"), "").unwrap();

        let files = collect_source_files(dir.path(), &FirstLineParser).unwrap();
        assert_eq!(files, vec!["A.kt", "B.kt"]);
    }

    #[test]
    fn test_parse_files_returns_every_file() {
        let dir = TempDir::new().unwrap();
        let mut names = Vec::new();
        for i in 0..25 {
            let name = format!("F{:02}.kt", i);
            fs::write(dir.path().join(&name), format!("package p{}\n", i)).unwrap();
            names.push(name);
        }

        let parsed = parse_files(&FirstLineParser, dir.path(), &names, 4).unwrap();
        assert_eq!(parsed.len(), 25);
        assert_eq!(parsed[0].result.file, "F00.kt");
        assert_eq!(
            parsed[7].result.package.as_ref().map(|p| p.literal()),
            Some("p7".to_string())
        );
        assert!(parsed.iter().all(|p| p.errors.is_empty()));
    }

    #[test]
    fn test_unreadable_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let parsed =
            parse_files(&FirstLineParser, dir.path(), &["Missing.kt".to_string()], 2).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].errors.len(), 1);
        assert!(parsed[0].errors[0].message.contains("failed to read"));
    }
}
