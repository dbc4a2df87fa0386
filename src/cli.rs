// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::ExecutionPolicy;

/// Command-line arguments for `renderq`.
///
/// Flags override the config file, which overrides built-in defaults.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "renderq",
    version,
    about = "Run JSON job descriptors dropped into a directory, highest priority first.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Renderq.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seconds to wait between job scans when the queue is empty.
    #[arg(long, value_name = "SECONDS")]
    pub poll_interval: Option<f64>,

    /// Directory to watch for job descriptors.
    #[arg(long, value_name = "PATH")]
    pub jobs_dir: Option<PathBuf>,

    /// How commands are executed.
    #[arg(long, value_enum, value_name = "MODE")]
    pub exec_mode: Option<ExecutionPolicy>,

    /// Directory for the log file.
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Log to stdout only.
    #[arg(long)]
    pub no_log_file: bool,

    /// Run until the queue is empty, then exit instead of polling forever.
    #[arg(long)]
    pub once: bool,

    /// List the descriptors that would be queued, in run order, without
    /// consuming or executing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RENDERQ_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
