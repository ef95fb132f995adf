// src/watch/sentinel.rs

//! External restart sentinel file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{ReloadError, Result};

/// A plain file whose non-empty content signals a pending restart request.
///
/// The content protocol is ad hoc: empty string means "no request", anything
/// else means "request pending". Writes are not atomic and [`SentinelFile::request`]
/// overwrites unconditionally, so the sentinel assumes a single writer;
/// coordinating concurrent writers is the caller's responsibility.
///
/// Reading never consumes a request. Clearing happens only through
/// [`SentinelFile::clear`], which the supervisor calls as part of acting on
/// the request, so a request cannot be dropped between two readers.
#[derive(Debug, Clone)]
pub struct SentinelFile {
    path: PathBuf,
}

impl SentinelFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the sentinel empty when it does not exist yet, so the first
    /// poll has a readable trigger channel.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        self.write("")
    }

    /// Whether a restart request is pending. A read failure is fatal for the
    /// trigger strategy: the sentinel is its sole restart channel.
    pub fn poll(&self) -> Result<bool> {
        let contents = fs::read_to_string(&self.path).map_err(|source| {
            ReloadError::Sentinel {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(!contents.is_empty())
    }

    /// Consume a pending request.
    pub fn clear(&self) -> Result<()> {
        self.write("")
    }

    /// Request a restart on the next poll.
    pub fn request(&self) -> Result<()> {
        self.write("1")
    }

    fn write(&self, contents: &str) -> Result<()> {
        fs::write(&self.path, contents).map_err(|source| ReloadError::Sentinel {
            path: self.path.clone(),
            source,
        })
    }
}
