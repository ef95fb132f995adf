// src/supervisor/signals.rs

//! OS signal handling.
//!
//! A single async helper that completes when the process receives an
//! interrupt or terminate signal. On Unix this covers SIGINT (Ctrl-C) and
//! SIGTERM (`kill <pid>`); elsewhere only Ctrl-C is available.

#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = sigint.recv() => {},
        _ = sigterm.recv() => {},
    }
    Ok(())
}

#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
