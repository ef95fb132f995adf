// src/watch/poller.rs

//! Modification-time polling over a resolved watch set.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::SystemTime;

use tracing::trace;
use walkdir::WalkDir;

use crate::watch::resolve::WatchSet;

/// Stateful poller that walks the watch set and diffs file modification
/// times against a retained index.
///
/// The first observation of a path seeds the index without reporting a
/// change, so a fresh poller never fires on its first pass (cold-start
/// suppression). [`ChangePoller::reset`] restores exactly that cold state,
/// which the supervisor relies on after every restart.
#[derive(Debug)]
pub struct ChangePoller {
    watch_set: WatchSet,
    extension: String,
    mtimes: HashMap<PathBuf, SystemTime>,
}

impl ChangePoller {
    pub fn new(watch_set: WatchSet, extension: impl Into<String>) -> Self {
        Self {
            watch_set,
            extension: extension.into(),
            mtimes: HashMap::new(),
        }
    }

    /// Number of files currently tracked in the timestamp index.
    pub fn tracked_files(&self) -> usize {
        self.mtimes.len()
    }

    /// One poll pass: enumerate every tracked file under every watch
    /// directory and return the first one whose modification time moved
    /// strictly forward. Files that vanish or cannot be stat'ed between
    /// enumeration and inspection are skipped, not errors.
    pub fn poll(&mut self) -> Option<PathBuf> {
        for dir in self.watch_set.directories.clone() {
            for entry in WalkDir::new(&dir) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        trace!(error = %e, "skipping unreadable entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str())
                    != Some(self.extension.as_str())
                {
                    continue;
                }
                let mtime = match entry.metadata().ok().and_then(|m| m.modified().ok()) {
                    Some(mtime) => mtime,
                    None => {
                        trace!(path = ?path, "skipping file without readable mtime");
                        continue;
                    }
                };

                match self.mtimes.get(path) {
                    None => {
                        self.mtimes.insert(path.to_path_buf(), mtime);
                    }
                    Some(&old) if mtime > old => {
                        return Some(path.to_path_buf());
                    }
                    Some(_) => {}
                }
            }
        }
        None
    }

    /// Clear the timestamp index so the next poll cold-starts exactly as at
    /// initial startup.
    pub fn reset(&mut self) {
        self.mtimes.clear();
    }
}
