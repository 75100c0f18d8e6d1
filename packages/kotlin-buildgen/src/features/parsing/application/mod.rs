//! Parsing use cases

mod parse_files;

pub use parse_files::{collect_source_files, parse_files, worker_count, FileParse};
