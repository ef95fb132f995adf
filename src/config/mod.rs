// src/config/mod.rs

//! Configuration loading and validation for rewatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and merged `Settings` (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate the merged settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_from_path};
pub use model::{CommandSpec, ConfigFile, Settings, SupervisorSection, TriggerSection, WatchSection};
pub use validate::validate_settings;
