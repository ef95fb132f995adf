// src/watch/mod.rs

//! Poll-based change detection.
//!
//! This module is responsible for:
//! - Resolving raw include/exclude/watch-root inputs into a canonical,
//!   non-nested set of absolute directories (`resolve`).
//! - Polling those directories for files whose modification time moved
//!   forward (`poller`).
//! - Reading and writing the external restart sentinel file (`sentinel`).
//!
//! It does **not** know about processes or the supervisor lifecycle; it only
//! turns filesystem state into "something changed" answers.

pub mod poller;
pub mod resolve;
pub mod sentinel;

pub use poller::ChangePoller;
pub use resolve::{collapse_nested, display_path, resolve_watch_set, WatchInputs, WatchSet};
pub use sentinel::SentinelFile;
