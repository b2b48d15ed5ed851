//! fcp - recursive directory copy with a progress bar
//!
//! A thin command-line front end for the fancopy library.

use clap::{Parser, ValueEnum};
use fancopy::{
    CopyOptions, CopyStats, Error as FancopyError, ErrorCode, ProgressSink, copy_multiple,
    copy_tree, count_files, create_progress_bar,
};
use indicatif::ProgressBar;
use serde_json::{Value, json};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// fcp - copy directory trees with progress
///
/// Copies the contents of each SOURCE directory into DEST, creating DEST
/// if needed. With several sources, their contents are merged into DEST.
///
/// Usage:
///   fcp SOURCE DEST
///   fcp SOURCE... DEST
#[derive(Parser, Debug)]
#[command(name = "fcp", version, about, long_about = None)]
struct Args {
    /// Source directories followed by the destination directory
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Transfer buffer size in bytes (0 = 1 MiB)
    #[arg(short = 'b', long, default_value = "0")]
    buffer_size: usize,

    /// Number of worker threads (default: one per CPU)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Progress signals that may queue before copying waits on the display
    #[arg(long = "queue", default_value_t = fancopy::DEFAULT_PROGRESS_CAPACITY)]
    progress_capacity: usize,

    /// Only count the files that would be copied
    #[arg(short = 'n', long)]
    count_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Disable progress bar and informational logging
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Missing destination operand after '{operand}'")]
    MissingDestinationOperand { operand: PathBuf },

    #[error("Source does not exist: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Source is not a directory: {path}")]
    SourceNotDirectory { path: PathBuf },

    #[error("{source}")]
    Copy { source: FancopyError },

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::MissingDestinationOperand { .. } | Self::SourceNotDirectory { .. } => {
                ErrorCode::InvalidInput
            }
            Self::SourceNotFound { .. } => ErrorCode::SourceNotFound,
            Self::Copy { source } => source.code(),
            Self::JsonSerialize { .. } => ErrorCode::Internal,
        }
    }

    fn files_copied(&self) -> u64 {
        match self {
            Self::Copy { source } => source.files_copied(),
            _ => 0,
        }
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidInput => 2,
        _ => 1,
    }
}

fn init_logging(args: &Args) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(err) = run(&args) {
        error!(
            error = %err,
            code = %err.code(),
            files_copied = err.files_copied(),
            "copy failed"
        );
        if args.output == OutputMode::Json {
            // Nothing sensible left to report if this fails too
            let _ = print_json_value(&failure_json(&err));
        }
        std::process::exit(exit_code_for(err.code()));
    }
}

fn run(args: &Args) -> CliResult<()> {
    let (sources, dest) = resolve_sources_and_dest(&args.paths)?;
    for src in &sources {
        validate_source(src)?;
    }

    let options = build_options(args);
    debug!(?options, sources = sources.len(), dest = %dest.display(), "resolved arguments");

    if args.count_only {
        let mut total = 0;
        for src in &sources {
            total += count_files(src).map_err(|source| CliError::Copy { source })?;
        }
        return match args.output {
            OutputMode::Human => {
                println!("{total} files");
                Ok(())
            }
            OutputMode::Json => print_json_value(&json!({
                "schema_version": "1.0",
                "mode": "count",
                "files": total,
            })),
        };
    }

    let bar = if args.output == OutputMode::Human && !args.quiet {
        create_progress_bar(0)
    } else {
        ProgressBar::hidden()
    };

    let result = copy_sources(&sources, &dest, &options, &bar);

    match result {
        Ok(stats) => {
            info!(
                files_copied = stats.files_copied,
                bytes_copied = stats.bytes_copied,
                dirs_created = stats.dirs_created,
                duration = ?stats.duration,
                "copy finished"
            );
            match args.output {
                OutputMode::Human => {
                    if !args.quiet {
                        print_stats(&stats);
                    }
                    Ok(())
                }
                OutputMode::Json => print_json_value(&success_json(&stats)),
            }
        }
        Err(source) => {
            bar.abandon();
            Err(CliError::Copy { source })
        }
    }
}

fn resolve_sources_and_dest(paths: &[PathBuf]) -> CliResult<(Vec<PathBuf>, PathBuf)> {
    match paths.split_last() {
        Some((dest, sources)) if !sources.is_empty() => Ok((sources.to_vec(), dest.clone())),
        _ => Err(CliError::MissingDestinationOperand {
            operand: paths.first().cloned().unwrap_or_default(),
        }),
    }
}

fn validate_source(src: &Path) -> CliResult<()> {
    if !src.exists() {
        return Err(CliError::SourceNotFound {
            path: src.to_path_buf(),
        });
    }
    if !src.is_dir() {
        return Err(CliError::SourceNotDirectory {
            path: src.to_path_buf(),
        });
    }
    Ok(())
}

fn build_options(args: &Args) -> CopyOptions {
    let mut options = CopyOptions::default()
        .with_buffer_size(args.buffer_size)
        .with_progress_capacity(args.progress_capacity);
    if let Some(jobs) = args.jobs {
        options = options.with_parallel(jobs);
    }
    options
}

fn copy_sources<S: ProgressSink>(
    sources: &[PathBuf],
    dest: &Path,
    options: &CopyOptions,
    sink: &S,
) -> fancopy::Result<CopyStats> {
    match sources {
        [single] => copy_tree(single, dest, options, sink),
        many => copy_multiple(many, dest, options, sink),
    }
}

fn success_json(stats: &CopyStats) -> Value {
    json!({
        "schema_version": "1.0",
        "mode": "execute",
        "status": "ok",
        "files_copied": stats.files_copied,
        "bytes_copied": stats.bytes_copied,
        "dirs_created": stats.dirs_created,
        "duration_ms": u64::try_from(stats.duration.as_millis()).unwrap_or(u64::MAX),
    })
}

fn failure_json(err: &CliError) -> Value {
    json!({
        "schema_version": "1.0",
        "mode": "execute",
        "status": "failed",
        "files_copied": err.files_copied(),
        "error_code": err.code().as_str(),
        "error_message": err.to_string(),
    })
}

fn print_stats(stats: &CopyStats) {
    if stats.files_copied == 0 && stats.dirs_created == 0 {
        println!("Nothing to copy");
        return;
    }

    let mut parts = vec![format!("{} files", stats.files_copied)];
    if stats.dirs_created > 0 {
        parts.push(format!("{} dirs", stats.dirs_created));
    }
    println!(
        "Copied {} ({}) in {:.2?}",
        parts.join(", "),
        format_bytes(stats.bytes_copied),
        stats.duration
    );
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
