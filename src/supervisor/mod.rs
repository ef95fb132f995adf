// src/supervisor/mod.rs

//! Supervisor state machine and restart-trigger sources.
//!
//! - [`reloader`] owns the startup → observe → shutdown lifecycle and the
//!   subprocess restart protocol.
//! - [`source`] defines the polymorphic restart-trigger capability with its
//!   file-change and sentinel-file variants.
//! - [`exit`] is the shared flag connecting signal delivery to the observe
//!   loop's wait primitive.
//! - [`signals`] listens for interrupt/terminate.

pub mod exit;
pub mod reloader;
pub mod signals;
pub mod source;

pub use exit::ExitFlag;
pub use reloader::Supervisor;
pub use signals::wait_for_shutdown_signal;
pub use source::{
    FileChangeSource, RestartHandle, RestartRequest, RestartSource, SentinelSource,
};
