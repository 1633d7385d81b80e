//! # Cross-platform OS signal handling.
//!
//! Provides [`wait_for_termination_signal`], an async helper that completes
//! when the process receives a termination signal and reports which one.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGUSR1` / `SIGUSR2` (operator-driven graceful termination)
//!
//! **Windows platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]

use crate::core::shutdown::TerminationCause;

/// Waits for a termination signal and reports its cause.
///
/// Each call creates independent signal listeners.
///
/// Returns the mapped [`TerminationCause`], or `Err` if signal registration
/// fails.
#[cfg(unix)]
pub async fn wait_for_termination_signal() -> std::io::Result<TerminationCause> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigusr1 = signal(SignalKind::user_defined1())?;
    let mut sigusr2 = signal(SignalKind::user_defined2())?;

    let cause = tokio::select! {
        _ = tokio::signal::ctrl_c() => TerminationCause::Interrupt,
        _ = sigint.recv()  => TerminationCause::Interrupt,
        _ = sigusr1.recv() => TerminationCause::User1,
        _ = sigusr2.recv() => TerminationCause::User2,
    };
    Ok(cause)
}

/// Waits for a termination signal and reports its cause.
///
/// Each call creates independent signal listeners.
///
/// Returns the mapped [`TerminationCause`], or `Err` if signal registration
/// fails.
#[cfg(not(unix))]
pub async fn wait_for_termination_signal() -> std::io::Result<TerminationCause> {
    tokio::signal::ctrl_c().await?;
    Ok(TerminationCause::Interrupt)
}
