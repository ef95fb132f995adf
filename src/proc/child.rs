// src/proc/child.rs

//! Supervised child process handle.

use std::io;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::config::CommandSpec;
use crate::errors::Result;

/// Wrapper around a `tokio::process::Child` with the lifecycle the
/// supervisor needs: spawn, terminate, join.
///
/// Stdio is inherited so the supervised command behaves as if it ran in the
/// foreground. `kill_on_drop` backstops abnormal supervisor exits.
#[derive(Debug)]
pub struct SupervisedChild {
    child: Child,
    pid: Option<u32>,
}

impl SupervisedChild {
    pub fn spawn(command: &CommandSpec) -> Result<Self> {
        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let child = cmd.spawn().with_context(|| {
            format!("spawning supervised process '{}'", command.display())
        })?;
        let pid = child.id();

        info!(pid = ?pid, cmd = %command.display(), "supervised process started");
        Ok(Self { child, pid })
    }

    /// Ask the child to terminate without waiting for it to exit.
    ///
    /// A child that already exited is not an error.
    pub fn terminate(&mut self) -> Result<()> {
        debug!(pid = ?self.pid, "terminating supervised process");
        match self.child.start_kill() {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Wait for the child to fully exit. Blocks until the OS has reaped the
    /// process; there is deliberately no timeout here.
    pub async fn join(&mut self) -> Result<()> {
        let status = self
            .child
            .wait()
            .await
            .context("waiting for supervised process to exit")?;
        debug!(pid = ?self.pid, code = ?status.code(), "supervised process exited");
        Ok(())
    }
}
