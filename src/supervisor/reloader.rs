// src/supervisor/reloader.rs

//! The supervisor state machine.
//!
//! Lifecycle: `Created → Starting → Observing → (Restarting → Observing)* →
//! Stopping → Stopped`. One control flow runs startup, the observe loop, and
//! shutdown sequentially; signal delivery only ever sets the exit flag, and
//! the loop notices it at its next wait. The supervised process is a
//! separate OS process the supervisor talks to exclusively via
//! terminate/join.

use tracing::{debug, error, info, warn};

use crate::config::{CommandSpec, Settings};
use crate::errors::{ReloadError, Result};
use crate::proc::ProcessBackend;
use crate::supervisor::exit::ExitFlag;
use crate::supervisor::signals::wait_for_shutdown_signal;
use crate::supervisor::source::{RestartHandle, RestartRequest, RestartSource};
use crate::watch::display_path;

pub struct Supervisor<S: RestartSource, B: ProcessBackend> {
    settings: Settings,
    source: S,
    backend: B,
    exit: ExitFlag,
    command: Option<CommandSpec>,
    child: Option<B::Handle>,
    started: bool,
    pid: u32,
}

impl<S: RestartSource, B: ProcessBackend> Supervisor<S, B> {
    pub fn new(settings: Settings, source: S, backend: B) -> Self {
        Self {
            settings,
            source,
            backend,
            exit: ExitFlag::new(),
            command: None,
            child: None,
            started: false,
            pid: std::process::id(),
        }
    }

    /// A clone of the exit flag, for stopping the supervisor from another
    /// task while `start()` is running.
    pub fn exit_flag(&self) -> ExitFlag {
        self.exit.clone()
    }

    /// Idempotent; sets the exit flag. Safe to call from the signal path.
    pub fn stop(&self) {
        self.exit.set();
    }

    /// Request a reload on the next observe tick: a sentinel write for the
    /// trigger strategy, an in-memory flag for the file strategy.
    pub fn restart(&mut self) -> Result<()> {
        self.source.request_restart()
    }

    /// A cloneable handle for requesting reloads while `start()` is running,
    /// the counterpart of [`Supervisor::exit_flag`] for `stop()`.
    pub fn restart_handle(&self) -> RestartHandle {
        self.source.restart_handle()
    }

    /// Run startup, then the observe loop, then shutdown, synchronously in
    /// that order. Blocks until the exit flag is set.
    ///
    /// Calling `start()` on an already-started instance is a no-op. A
    /// missing target command fails fast with a configuration error before
    /// any subprocess is spawned; shutdown still terminates and joins the
    /// live subprocess no matter how the observe loop exited.
    pub async fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        self.startup().await?;
        let observed = self.observe().await;
        let shutdown = self.shutdown().await;
        observed.and(shutdown)
    }

    async fn startup(&mut self) -> Result<()> {
        let command = self.settings.command.clone().ok_or_else(|| {
            ReloadError::Config("a target command is required".to_string())
        })?;

        info!(
            "Started supervisor process [{}] using {}",
            self.pid,
            self.source.kind()
        );
        self.install_signal_handlers();
        self.source.startup()?;

        self.child = Some(self.backend.spawn(&command).await?);
        self.command = Some(command);
        Ok(())
    }

    fn install_signal_handlers(&self) {
        let exit = self.exit.clone();
        tokio::spawn(async move {
            match wait_for_shutdown_signal().await {
                Ok(()) => {
                    debug!("shutdown signal received");
                    exit.set();
                }
                Err(e) => {
                    error!(error = %e, "failed to listen for shutdown signals");
                }
            }
        });
    }

    /// The only state that may loop. Every iteration waits up to the reload
    /// delay on the exit flag; a set flag ends the loop cooperatively
    /// without any further poll. On timeout expiry the active source is
    /// polled exactly once.
    async fn observe(&mut self) -> Result<()> {
        loop {
            if self.exit.wait_timeout(self.settings.reload_delay).await {
                return Ok(());
            }
            match self.source.poll()? {
                Some(RestartRequest::ChangedFiles(files)) => {
                    let listed = files
                        .iter()
                        .map(|p| display_path(p))
                        .collect::<Vec<_>>()
                        .join(", ");
                    warn!(
                        "{} detected changes in {}. Reloading...",
                        self.settings.name, listed
                    );
                    self.restart_child().await?;
                }
                Some(RestartRequest::External) => {
                    warn!(
                        "{} detected restart trigger. Reloading...",
                        self.settings.name
                    );
                    self.restart_child().await?;
                }
                None => {}
            }
        }
    }

    /// The restart protocol: acknowledge the source (clearing any pending
    /// trigger state), terminate and join the old subprocess, then spawn a
    /// new one for the same command. Old and new never overlap; the loop is
    /// single-threaded with respect to restart decisions, so this routine is
    /// never re-entered.
    async fn restart_child(&mut self) -> Result<()> {
        self.source.acknowledge()?;
        self.reap_child().await?;

        let command = self.command.clone().ok_or_else(|| {
            ReloadError::Config("restart requested before startup".to_string())
        })?;
        self.child = Some(self.backend.spawn(&command).await?);
        Ok(())
    }

    async fn reap_child(&mut self) -> Result<()> {
        if let Some(mut handle) = self.child.take() {
            self.backend.terminate(&mut handle).await?;
            self.backend.join(handle).await?;
        }
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<()> {
        self.reap_child().await?;
        info!("Stopping supervisor process [{}]", self.pid);
        Ok(())
    }
}
