//! # Shutdown controller - explicit termination capability.
//!
//! Termination is an injected capability rather than process-global state:
//! every collaborator that may request exit holds a clone of
//! [`ShutdownController`] and calls [`trigger`](ShutdownController::trigger)
//! or [`fault`](ShutdownController::fault). The orchestrator awaits
//! [`cancelled`](ShutdownController::cancelled) in its steady state.
//!
//! ## Rules
//! - The first cause wins; later triggers are ignored (idempotent).
//! - A fault is just a trigger with a [`TerminationCause::Fault`] payload.
//! - Signal installation is optional, so tests drive termination without
//!   real signals.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::core::signals::wait_for_termination_signal;
use crate::error::FatalFault;

/// Why the lifecycle is terminating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationCause {
    /// `SIGINT` / Ctrl-C.
    Interrupt,
    /// `SIGUSR1`.
    User1,
    /// `SIGUSR2`.
    User2,
    /// Explicit exit request from application code.
    Exit,
    /// Uncaught fault; always logged at fatal severity before pre-terminate.
    Fault(FatalFault),
}

impl TerminationCause {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TerminationCause::Interrupt => "interrupt",
            TerminationCause::User1 => "user1",
            TerminationCause::User2 => "user2",
            TerminationCause::Exit => "exit",
            TerminationCause::Fault(_) => "fault",
        }
    }
}

impl std::fmt::Display for TerminationCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationCause::Fault(fault) => write!(f, "{fault}"),
            other => f.write_str(other.as_label()),
        }
    }
}

/// How a completed lifecycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitOutcome {
    cause: TerminationCause,
}

impl ExitOutcome {
    pub(crate) fn new(cause: TerminationCause) -> Self {
        Self { cause }
    }

    /// The termination trigger that ended the run.
    pub fn cause(&self) -> &TerminationCause {
        &self.cause
    }

    /// Conventional process exit code: 0 for graceful causes, 1 for a fault.
    pub fn exit_code(&self) -> i32 {
        match self.cause {
            TerminationCause::Fault(_) => 1,
            _ => 0,
        }
    }
}

/// Shared, cloneable termination capability.
#[derive(Clone)]
pub struct ShutdownController {
    inner: Arc<Inner>,
}

struct Inner {
    token: CancellationToken,
    cause: Mutex<Option<TerminationCause>>,
    tripped: AtomicBool,
}

impl ShutdownController {
    /// Creates an untripped controller.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                token: CancellationToken::new(),
                cause: Mutex::new(None),
                tripped: AtomicBool::new(false),
            }),
        }
    }

    /// Requests termination with `cause`.
    ///
    /// The first call wins; returns whether this call tripped the controller.
    pub fn trigger(&self, cause: TerminationCause) -> bool {
        if self.inner.tripped.swap(true, Ordering::SeqCst) {
            return false;
        }
        if let Ok(mut slot) = self.inner.cause.lock() {
            *slot = Some(cause);
        }
        self.inner.token.cancel();
        true
    }

    /// Records an uncaught fault and requests termination.
    pub fn fault(&self, error: impl Into<String>, origin: impl Into<String>) -> bool {
        self.trigger(TerminationCause::Fault(FatalFault {
            error: error.into(),
            origin: origin.into(),
        }))
    }

    /// Whether termination has been requested.
    pub fn is_triggered(&self) -> bool {
        self.inner.tripped.load(Ordering::SeqCst)
    }

    /// The recorded cause, once tripped.
    pub fn cause(&self) -> Option<TerminationCause> {
        self.inner.cause.lock().ok().and_then(|slot| slot.clone())
    }

    /// Resolves when termination has been requested.
    pub async fn cancelled(&self) {
        self.inner.token.cancelled().await;
    }

    /// Spawns a listener mapping OS termination signals onto this controller.
    ///
    /// Optional: tests skip it and call [`trigger`](Self::trigger) directly.
    pub fn install_signals(&self) {
        let me = self.clone();
        tokio::spawn(async move {
            if let Ok(cause) = wait_for_termination_signal().await {
                me.trigger(cause);
            }
        });
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
