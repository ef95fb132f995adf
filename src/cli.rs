// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `rewatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rewatch",
    version,
    about = "Keep a command running and restart it on file changes or an external trigger.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to an optional config file (TOML).
    ///
    /// When omitted, `Rewatch.toml` in the current working directory is
    /// loaded if it exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Supervisor name used in log lines.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Seconds to wait between polls (must be > 0).
    #[arg(long, value_name = "SECONDS")]
    pub delay: Option<f64>,

    /// Directory to watch recursively. May be given multiple times.
    #[arg(long = "dir", value_name = "DIR")]
    pub dirs: Vec<String>,

    /// Include pattern: a directory path or a glob expanded against the
    /// current working directory. May be given multiple times.
    #[arg(long = "include", value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Exclude pattern, resolved like `--include` and subtracted from the
    /// watched set. May be given multiple times.
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// File extension to track, without the leading dot.
    #[arg(long, value_name = "EXT")]
    pub ext: Option<String>,

    /// Watch a sentinel file instead of polling for source changes.
    ///
    /// Writing any non-empty content to the file requests a restart.
    #[arg(long, value_name = "PATH")]
    pub trigger_file: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `REWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Command to supervise, e.g. `rewatch -- python app.py`.
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
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
