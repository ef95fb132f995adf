// src/supervisor/exit.rs

//! Shared exit flag between the signal path and the observe loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

/// Edge-triggered exit flag.
///
/// Written by the signal task and [`crate::supervisor::Supervisor::stop`];
/// read by the observe loop's wait primitive. Once set it never resets
/// within a supervisor lifetime. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct ExitFlag {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    set: AtomicBool,
    notify: Notify,
}

impl ExitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent; safe to call from the signal path.
    pub fn set(&self) {
        self.inner.set.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    pub fn is_set(&self) -> bool {
        self.inner.set.load(Ordering::Acquire)
    }

    /// Wait up to `timeout` for the flag. Returns `true` when the flag is
    /// set, returning early the instant it becomes set.
    pub async fn wait_timeout(&self, timeout: Duration) -> bool {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // Register the waiter before re-checking the flag, so a `set()`
        // between the check and the await cannot be missed.
        notified.as_mut().enable();
        if self.is_set() {
            return true;
        }
        let _ = tokio::time::timeout(timeout, notified).await;
        self.is_set()
    }
}
