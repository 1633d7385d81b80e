//! Error types used by the servisor runtime and phase operations.
//!
//! This module defines the error taxonomy of the crate:
//!
//! - [`ConfigError`] — failures in the configuration resolution pipeline.
//! - [`OpError`] — errors raised by individual phase operations and jobs.
//! - [`PhaseError`] — an [`OpError`] attributed to the lifecycle phase it ran in.
//! - [`ScheduleError`] — per-job failures around schedule installation.
//! - [`FatalFault`] — an uncaught fault observed while the service was running.
//! - [`BootError`] — umbrella error returned by [`Orchestrator::run`](crate::Orchestrator::run).
//!
//! Types provide `as_label()` helpers for logging/metrics.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::Phase;

/// # Errors produced by the configuration resolution pipeline.
///
/// Any of these aborts resolution before the first phase runs; the
/// orchestrator never starts partially configured.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Two configuration layers could not be merged (e.g. a non-mapping root).
    #[error("cannot merge configuration layers: {context}")]
    MergeConflict {
        /// What was being merged when the conflict surfaced.
        context: String,
    },

    /// Filesystem failure while creating or reading the secret store.
    #[error("secret store i/o failure at {path:?}: {source}")]
    SecretIo {
        /// Path of the secret file or its directory.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// An existing secret file failed to parse. The secret is authoritative
    /// once present, so this is fatal to startup.
    #[error("secret file {path:?} is corrupt: {reason}")]
    SecretCorrupt {
        /// Path of the secret file.
        path: PathBuf,
        /// Parse failure description.
        reason: String,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::MergeConflict { .. } => "config_merge_conflict",
            ConfigError::SecretIo { .. } => "config_secret_io",
            ConfigError::SecretCorrupt { .. } => "config_secret_corrupt",
        }
    }
}

/// # Errors produced by phase operations and scheduled jobs.
///
/// The operation-facing failure type: user code returns this from
/// [`PhaseOp::run`](crate::PhaseOp::run) and [`Job::run`](crate::Job::run).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum OpError {
    /// Operation failed with a message.
    #[error("operation failed: {error}")]
    Failed {
        /// Failure description.
        error: String,
    },

    /// Operation observed cancellation and exited early.
    #[error("operation canceled")]
    Canceled,
}

impl OpError {
    /// Shorthand for [`OpError::Failed`].
    pub fn failed(error: impl Into<String>) -> Self {
        OpError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            OpError::Failed { .. } => "op_failed",
            OpError::Canceled => "op_canceled",
        }
    }
}

/// A phase operation failure attributed to the phase it ran in.
///
/// Operations within a phase run strictly in registration order, so the
/// failing operation's position tells you exactly what ran before it.
#[derive(Error, Debug)]
#[error("phase {phase} failed: {source}")]
pub struct PhaseError {
    /// The lifecycle phase the operation belonged to.
    pub phase: Phase,
    /// The underlying operation error.
    #[source]
    pub source: OpError,
}

/// # Per-job failures around schedule installation and registration.
///
/// One job's failure to install never blocks installing the others.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The schedule pattern could not be parsed by the scheduler.
    #[error("job {job}: invalid schedule pattern: {reason}")]
    InvalidPattern {
        /// Name of the job being installed.
        job: String,
        /// Parse failure description.
        reason: String,
    },

    /// A job with this name is already active; it must be cancelled via
    /// [`Orchestrator::cancel_schedule`](crate::Orchestrator::cancel_schedule)
    /// before it can be re-registered.
    #[error("job {job} is already active; cancel it before re-registering")]
    AlreadyActive {
        /// Name of the conflicting job.
        job: String,
    },
}

impl ScheduleError {
    /// Returns the name of the job this error concerns.
    pub fn job(&self) -> &str {
        match self {
            ScheduleError::InvalidPattern { job, .. } => job,
            ScheduleError::AlreadyActive { job } => job,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ScheduleError::InvalidPattern { .. } => "schedule_invalid_pattern",
            ScheduleError::AlreadyActive { .. } => "schedule_already_active",
        }
    }
}

/// An uncaught fault observed after the service reached its running state.
///
/// Always logged at fatal severity exactly once, then the lifecycle moves
/// straight to termination — in-memory state is untrustworthy after an
/// uncaught fault, so there is no recovery path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalFault {
    /// Description of the fault.
    pub error: String,
    /// Where the fault surfaced (task name, subsystem, ...).
    pub origin: String,
}

impl std::fmt::Display for FatalFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fatal fault in {}: {}", self.origin, self.error)
    }
}

/// # Umbrella error returned by [`Orchestrator::run`](crate::Orchestrator::run).
///
/// Startup failures leave the orchestrator in a failed, non-restartable
/// state; restart requires constructing a new instance.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BootError {
    /// Configuration resolution failed; no phase ran.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A startup phase operation failed; remaining phases were skipped.
    #[error(transparent)]
    Phase(#[from] PhaseError),

    /// `run()` was called more than once on the same orchestrator.
    #[error("orchestrator already ran; construct a new instance to restart")]
    AlreadyRan,
}

impl BootError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BootError::Config(e) => e.as_label(),
            BootError::Phase(_) => "phase_failed",
            BootError::AlreadyRan => "already_ran",
        }
    }
}
