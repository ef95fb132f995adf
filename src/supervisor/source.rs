// src/supervisor/source.rs

//! Restart-trigger sources.
//!
//! The supervisor is parameterized over a [`RestartSource`] rather than
//! subclassed per strategy: the two variants share no mutable state beyond
//! the lifecycle skeleton, only the answer to "should we reload now?".

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{ReloadError, Result};
use crate::watch::{resolve_watch_set, ChangePoller, SentinelFile, WatchInputs};

/// What a restart source reported on a poll tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartRequest {
    /// Watched files with modification times newer than last observed.
    ChangedFiles(Vec<PathBuf>),
    /// An external request: sentinel write or an in-process `restart()`.
    External,
}

/// Cloneable handle for requesting a reload while the supervisor runs.
///
/// `start()` holds the supervisor exclusively for its whole lifetime, so
/// mid-run requests go through a handle obtained beforehand, the same way
/// [`crate::supervisor::ExitFlag`] carries `stop()`.
#[derive(Debug, Clone)]
pub enum RestartHandle {
    /// Shared in-memory flag (file-change strategy).
    Flag(Arc<AtomicBool>),
    /// Sentinel write (trigger-file strategy).
    Sentinel(SentinelFile),
}

impl RestartHandle {
    /// Ask for a reload on the next observe tick.
    pub fn request(&self) -> Result<()> {
        match self {
            RestartHandle::Flag(flag) => {
                flag.store(true, Ordering::Release);
                Ok(())
            }
            RestartHandle::Sentinel(sentinel) => sentinel.request(),
        }
    }
}

/// One restart-trigger strategy.
///
/// The supervisor calls `startup` once, then `poll` once per observe tick,
/// and `acknowledge` as the first step of every restart. `poll` must not
/// consume pending trigger state; only `acknowledge` does.
pub trait RestartSource: Send {
    /// Strategy label for the startup log line.
    fn kind(&self) -> &'static str;

    /// One-time initialisation at supervisor startup.
    fn startup(&mut self) -> Result<()>;

    /// One poll tick. `None` means nothing to do.
    fn poll(&mut self) -> Result<Option<RestartRequest>>;

    /// Consume pending trigger state. Called as part of the restart routine,
    /// never on its own.
    fn acknowledge(&mut self) -> Result<()>;

    /// Ask for a reload on the next observe tick.
    fn request_restart(&mut self) -> Result<()>;

    /// A cloneable handle carrying [`RestartSource::request_restart`] across
    /// tasks.
    fn restart_handle(&self) -> RestartHandle;
}

/// Poll-based file-change detection over a resolved watch set, plus an
/// in-memory restart flag for programmatic `restart()` requests.
#[derive(Debug)]
pub struct FileChangeSource {
    inputs: WatchInputs,
    extension: String,
    poller: Option<ChangePoller>,
    restart_requested: Arc<AtomicBool>,
}

impl FileChangeSource {
    pub fn new(inputs: WatchInputs, extension: impl Into<String>) -> Self {
        Self {
            inputs,
            extension: extension.into(),
            poller: None,
            restart_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    fn poller(&mut self) -> Result<&mut ChangePoller> {
        self.poller.as_mut().ok_or_else(|| {
            ReloadError::Config("file-change source polled before startup".to_string())
        })
    }
}

impl RestartSource for FileChangeSource {
    fn kind(&self) -> &'static str {
        "file-change"
    }

    /// Resolves the watch configuration. Runs once; the resulting watch set
    /// is read-only for the rest of the supervisor lifetime.
    fn startup(&mut self) -> Result<()> {
        let watch_set = resolve_watch_set(&self.inputs);
        self.poller = Some(ChangePoller::new(watch_set, self.extension.clone()));
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<RestartRequest>> {
        if let Some(path) = self.poller()?.poll() {
            return Ok(Some(RestartRequest::ChangedFiles(vec![path])));
        }
        if self.restart_requested.load(Ordering::Acquire) {
            return Ok(Some(RestartRequest::External));
        }
        Ok(None)
    }

    fn acknowledge(&mut self) -> Result<()> {
        self.restart_requested.store(false, Ordering::Release);
        if let Some(poller) = self.poller.as_mut() {
            poller.reset();
        }
        Ok(())
    }

    fn request_restart(&mut self) -> Result<()> {
        self.restart_requested.store(true, Ordering::Release);
        Ok(())
    }

    fn restart_handle(&self) -> RestartHandle {
        RestartHandle::Flag(Arc::clone(&self.restart_requested))
    }
}

/// Sentinel-file driven restarts: any external writer (typically another
/// process) requests a reload by writing non-empty content to the file.
#[derive(Debug)]
pub struct SentinelSource {
    sentinel: SentinelFile,
}

impl SentinelSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            sentinel: SentinelFile::new(path),
        }
    }
}

impl RestartSource for SentinelSource {
    fn kind(&self) -> &'static str {
        "trigger-file"
    }

    fn startup(&mut self) -> Result<()> {
        self.sentinel.ensure_exists()
    }

    fn poll(&mut self) -> Result<Option<RestartRequest>> {
        Ok(self.sentinel.poll()?.then_some(RestartRequest::External))
    }

    fn acknowledge(&mut self) -> Result<()> {
        self.sentinel.clear()
    }

    fn request_restart(&mut self) -> Result<()> {
        self.sentinel.request()
    }

    fn restart_handle(&self) -> RestartHandle {
        RestartHandle::Sentinel(self.sentinel.clone())
    }
}
