// src/proc/backend.rs

//! Pluggable process execution provider.
//!
//! The supervisor owns exactly one handle at a time and never calls these
//! operations concurrently on the same handle: terminate is always followed
//! by join before any further spawn.

use std::future::Future;
use std::pin::Pin;

use crate::config::CommandSpec;
use crate::errors::Result;
use crate::proc::child::SupervisedChild;

/// Trait abstracting how the supervised process is created, terminated, and
/// joined.
///
/// Production code uses [`TokioProcessBackend`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ProcessBackend: Send {
    type Handle: Send;

    /// Spawn a new supervised process running `command`.
    fn spawn<'a>(
        &'a mut self,
        command: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<Self::Handle>> + Send + 'a>>;

    /// Ask the process to terminate. Does not wait for exit.
    fn terminate<'a>(
        &'a mut self,
        handle: &'a mut Self::Handle,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

    /// Wait for the process to fully exit, consuming the handle.
    fn join<'a>(
        &'a mut self,
        handle: Self::Handle,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Real process backend used in production, built on `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct TokioProcessBackend;

impl TokioProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessBackend for TokioProcessBackend {
    type Handle = SupervisedChild;

    fn spawn<'a>(
        &'a mut self,
        command: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<Self::Handle>> + Send + 'a>> {
        Box::pin(async move { SupervisedChild::spawn(command) })
    }

    fn terminate<'a>(
        &'a mut self,
        handle: &'a mut Self::Handle,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move { handle.terminate() })
    }

    fn join<'a>(
        &'a mut self,
        mut handle: Self::Handle,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move { handle.join().await })
    }
}
