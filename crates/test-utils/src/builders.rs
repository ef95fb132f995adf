#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use rewatch::config::{CommandSpec, Settings};

/// Builder for `Settings` to simplify test setup.
///
/// Defaults: name `"test"`, a 50ms reload delay, no command, no watch
/// inputs, extension `"py"`, no trigger file.
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings {
                name: "test".to_string(),
                reload_delay: Duration::from_millis(50),
                command: None,
                watch_dirs: vec![],
                include: vec![],
                exclude: vec![],
                extension: "py".to_string(),
                trigger_file: None,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.settings.name = name.to_string();
        self
    }

    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.settings.reload_delay = Duration::from_millis(ms);
        self
    }

    pub fn command(mut self, argv: &[&str]) -> Self {
        self.settings.command =
            CommandSpec::new(argv.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn dir(mut self, dir: impl Into<String>) -> Self {
        self.settings.watch_dirs.push(dir.into());
        self
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.settings.include.push(pattern.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.settings.exclude.push(pattern.into());
        self
    }

    pub fn extension(mut self, ext: &str) -> Self {
        self.settings.extension = ext.to_string();
        self
    }

    pub fn trigger_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.trigger_file = Some(path.into());
        self
    }

    pub fn build(self) -> Settings {
        self.settings
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
