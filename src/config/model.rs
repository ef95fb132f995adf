// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::cli::CliArgs;
use crate::errors::{ReloadError, Result};

const DEFAULT_NAME: &str = "rewatch";
const DEFAULT_RELOAD_DELAY_SECS: f64 = 0.25;
const DEFAULT_EXTENSION: &str = "py";

/// A command line to supervise: program plus arguments.
///
/// Constructed through [`CommandSpec::new`], which rejects empty argv so the
/// program component is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    argv: Vec<String>,
}

impl CommandSpec {
    pub fn new(argv: Vec<String>) -> Option<Self> {
        if argv.is_empty() {
            None
        } else {
            Some(Self { argv })
        }
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// Full command line for log output.
    pub fn display(&self) -> String {
        self.argv.join(" ")
    }
}

/// Top-level configuration as read from a TOML file (`Rewatch.toml`):
///
/// ```toml
/// [supervisor]
/// name = "app"
/// reload_delay = 0.25
/// command = ["python", "app.py"]
///
/// [watch]
/// dirs = ["src"]
/// include = ["lib*"]
/// exclude = [".git"]
/// extension = "py"
///
/// [trigger]
/// file = ".rewatch-trigger"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub supervisor: SupervisorSection,

    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub trigger: TriggerSection,
}

/// `[supervisor]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupervisorSection {
    /// Supervisor name used in log lines.
    #[serde(default)]
    pub name: Option<String>,

    /// Seconds to wait between polls.
    #[serde(default)]
    pub reload_delay: Option<f64>,

    /// The command to supervise, as an argv list.
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

/// `[watch]` section (file-change strategy only).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchSection {
    /// Directories to watch recursively.
    #[serde(default)]
    pub dirs: Vec<String>,

    /// Include patterns: directory paths or globs expanded against cwd.
    #[serde(default)]
    pub include: Vec<String>,

    /// Exclude patterns, resolved like includes and subtracted.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extension to track, without the leading dot.
    #[serde(default)]
    pub extension: Option<String>,
}

/// `[trigger]` section. Presence of `file` selects the trigger-file strategy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerSection {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Effective supervisor settings after merging the config file (if any) with
/// CLI flags. CLI values win; list-valued flags replace the file's lists
/// rather than appending to them.
#[derive(Debug, Clone)]
pub struct Settings {
    pub name: String,
    pub reload_delay: Duration,
    pub command: Option<CommandSpec>,
    pub watch_dirs: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub extension: String,
    pub trigger_file: Option<PathBuf>,
}

impl Settings {
    /// Merge a loaded config file and CLI arguments into effective settings.
    ///
    /// The reload delay is range-checked here because an invalid value can
    /// never produce a usable `Duration`.
    pub fn merge(cfg: Option<ConfigFile>, args: &CliArgs) -> Result<Self> {
        let cfg = cfg.unwrap_or_default();

        let delay_secs = args
            .delay
            .or(cfg.supervisor.reload_delay)
            .unwrap_or(DEFAULT_RELOAD_DELAY_SECS);
        let reload_delay = Duration::try_from_secs_f64(delay_secs).map_err(|e| {
            ReloadError::Config(format!("invalid reload delay {delay_secs}: {e}"))
        })?;
        if reload_delay.is_zero() {
            return Err(ReloadError::Config(
                "reload delay must be greater than zero".to_string(),
            ));
        }

        let command = if !args.command.is_empty() {
            CommandSpec::new(args.command.clone())
        } else {
            cfg.supervisor.command.and_then(CommandSpec::new)
        };

        Ok(Self {
            name: args
                .name
                .clone()
                .or(cfg.supervisor.name)
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            reload_delay,
            command,
            watch_dirs: pick_list(&args.dirs, cfg.watch.dirs),
            include: pick_list(&args.include, cfg.watch.include),
            exclude: pick_list(&args.exclude, cfg.watch.exclude),
            extension: args
                .ext
                .clone()
                .or(cfg.watch.extension)
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            trigger_file: args.trigger_file.clone().or(cfg.trigger.file),
        })
    }
}

fn pick_list(cli: &[String], file: Vec<String>) -> Vec<String> {
    if cli.is_empty() {
        file
    } else {
        cli.to_vec()
    }
}
