// src/proc/mod.rs

//! Process execution layer.
//!
//! The supervisor talks to a [`ProcessBackend`] instead of spawning
//! processes directly. This makes it easy to swap in a fake backend in tests
//! while keeping the production implementation in [`child`].
//!
//! - [`backend`] defines the provider trait and its tokio implementation.
//! - [`child`] wraps the actual `tokio::process` child handle.

pub mod backend;
pub mod child;

pub use backend::{ProcessBackend, TokioProcessBackend};
pub use child::SupervisedChild;
