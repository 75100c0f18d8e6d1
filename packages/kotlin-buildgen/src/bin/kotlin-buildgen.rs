//! kotlin-buildgen CLI
//!
//! ```text
//! kotlin-buildgen generate --repo . [--config buildgen.yaml] [--maven-install maven_install.json]
//! kotlin-buildgen dump --repo . --pattern 'src/.*\.kt$'
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use regex::Regex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use kotlin_buildgen::config::RunConfig;
use kotlin_buildgen::errors::{BuildgenError, Result};
use kotlin_buildgen::features::parsing::{KotlinParser, Parser};
use kotlin_buildgen::pipeline::Generator;

#[derive(ClapParser)]
#[command(
    name = "kotlin-buildgen",
    version,
    about = "Generate Bazel kt_jvm rules from Kotlin sources"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Worker threads for resolution (defaults to the number of CPUs)
    #[arg(long, global = true, value_name = "N")]
    jobs: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate rules for every directory of a repository
    Generate {
        /// Repository root
        #[arg(long, default_value = ".")]
        repo: PathBuf,

        /// Run configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// maven_install.json lock file (overrides the configuration file)
        #[arg(long, value_name = "FILE")]
        maven_install: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Parse Kotlin files and report parse errors
    Dump {
        /// Repository root
        #[arg(long, default_value = ".")]
        repo: PathBuf,

        /// Regex matched against repository-relative paths
        #[arg(long, default_value = r"\.kts?$")]
        pattern: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let jobs = cli.jobs.unwrap_or_else(num_cpus::get).max(1);
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()
    {
        error!("Failed to configure thread pool: {}", e);
        return ExitCode::FAILURE;
    }

    let outcome = match cli.command {
        Commands::Generate {
            repo,
            config,
            maven_install,
            format,
        } => cmd_generate(&repo, config.as_deref(), maven_install, format),
        Commands::Dump { repo, pattern } => cmd_dump(&repo, &pattern),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_generate(
    repo: &Path,
    config: Option<&Path>,
    maven_install: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let mut run = match config {
        Some(path) => RunConfig::from_yaml_file(path)?,
        None => RunConfig::default(),
    };
    if maven_install.is_some() {
        run.maven_install = maven_install;
    }

    let result = Generator::from_run_config(repo, run)?.run()?;

    match format {
        OutputFormat::Text => {
            print!("{}", result);
            for diagnostic in result.diagnostics.iter() {
                eprintln!("{}", diagnostic);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| BuildgenError::Io(e.into()))?;
            println!("{}", json);
        }
    }
    eprintln!("{}", result.diagnostics.summary());
    Ok(ExitCode::SUCCESS)
}

fn cmd_dump(repo: &Path, pattern: &str) -> Result<ExitCode> {
    let pattern = Regex::new(pattern)
        .map_err(|e| BuildgenError::parse(format!("invalid --pattern: {}", e)))?;
    let parser = KotlinParser::new();

    let mut files = 0usize;
    let mut errors = 0usize;
    for entry in WalkDir::new(repo).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(repo)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        if !pattern.is_match(&rel) {
            continue;
        }
        files += 1;

        let source = match std::fs::read_to_string(entry.path()) {
            Ok(source) => source,
            Err(e) => {
                error!("error analyzing file {}: {}", rel, e);
                errors += 1;
                continue;
            }
        };
        let (result, parse_errors) = parser.parse(&rel, &source);
        if !parse_errors.is_empty() {
            errors += 1;
            eprintln!("{} parse error(s):", rel);
            for parse_error in &parse_errors {
                eprintln!("  {}", parse_error);
            }
        }
        match &result.package {
            Some(package) => println!("{}\t{}\t{} imports", rel, package, result.imports.len()),
            None => println!("{}\t-\t{} imports", rel, result.imports.len()),
        }
    }

    info!("{:?} matched {} files", pattern.as_str(), files);
    eprintln!("{} total files, {} errors", files, errors);
    Ok(if errors == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
