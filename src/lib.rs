// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod proc;
pub mod supervisor;
pub mod watch;

use crate::cli::CliArgs;
use crate::config::{
    default_config_path, load_from_path, validate_settings, ConfigFile, Settings,
};
use crate::errors::Result;
use crate::proc::TokioProcessBackend;
use crate::supervisor::{FileChangeSource, SentinelSource, Supervisor};
use crate::watch::WatchInputs;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (optional `Rewatch.toml`) and CLI merging
/// - the restart-trigger source (file-change polling or trigger file)
/// - the real process backend
/// - the supervisor loop
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_config(&args)?;
    let settings = Settings::merge(cfg, &args)?;
    validate_settings(&settings)?;

    let backend = TokioProcessBackend::new();

    match settings.trigger_file.clone() {
        Some(path) => {
            let source = SentinelSource::new(path);
            Supervisor::new(settings, source, backend).start().await
        }
        None => {
            let inputs = WatchInputs {
                dirs: settings.watch_dirs.clone(),
                include: settings.include.clone(),
                exclude: settings.exclude.clone(),
            };
            let source = FileChangeSource::new(inputs, settings.extension.clone());
            Supervisor::new(settings, source, backend).start().await
        }
    }
}

/// Load the config file named by `--config`, or the default `Rewatch.toml`
/// when it exists. Running without any config file is fine; the CLI is a
/// complete surface on its own.
fn load_config(args: &CliArgs) -> Result<Option<ConfigFile>> {
    if let Some(path) = &args.config {
        return Ok(Some(load_from_path(path)?));
    }
    let default = default_config_path();
    if default.exists() {
        return Ok(Some(load_from_path(&default)?));
    }
    Ok(None)
}
