// src/config/validate.rs

use tracing::warn;

use crate::config::model::Settings;
use crate::errors::{ReloadError, Result};

/// Run basic semantic validation against merged settings.
///
/// This checks:
/// - the tracked extension is non-empty and given without a leading dot
///
/// It does **not** check that a command is present: that is a startup-time
/// contract of the supervisor, which must fail fast before spawning anything.
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.extension.is_empty() {
        return Err(ReloadError::Config(
            "tracked extension must not be empty".to_string(),
        ));
    }
    if settings.extension.starts_with('.') {
        return Err(ReloadError::Config(format!(
            "tracked extension must be given without a leading dot (got {:?})",
            settings.extension
        )));
    }

    // Watch inputs are meaningless when a trigger file drives restarts;
    // tell the user instead of silently ignoring them.
    if settings.trigger_file.is_some()
        && !(settings.watch_dirs.is_empty()
            && settings.include.is_empty()
            && settings.exclude.is_empty())
    {
        warn!("watch directories and patterns are ignored when a trigger file is configured");
    }

    Ok(())
}
