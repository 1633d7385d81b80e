//! # Scheduler collaborator seam.
//!
//! The core never drives timers itself; it hands each [`JobSpec`] to a
//! [`Scheduler`] and retains the returned [`JobHandle`] in the runtime table.
//! The built-in implementation is [`CronScheduler`](crate::CronScheduler);
//! tests substitute their own.

use tokio_util::sync::CancellationToken;

use crate::error::ScheduleError;
use crate::jobs::spec::JobSpec;

/// Installs job specifications into a live timer source.
pub trait Scheduler: Send + Sync + 'static {
    /// Installs the job and returns its cancel handle.
    ///
    /// Installation validates the pattern; per-job failures are reported via
    /// [`ScheduleError`] and never block installing other jobs.
    fn install(&self, spec: &JobSpec) -> Result<JobHandle, ScheduleError>;
}

/// Cancel handle for an active scheduled job.
///
/// Cancellation is cooperative: the scheduler's driver loop observes the
/// token and stops firing. Dropping the handle does **not** cancel the job.
#[derive(Debug, Clone)]
pub struct JobHandle {
    token: CancellationToken,
}

impl JobHandle {
    /// Creates a handle around the job's cancellation token.
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Stops the job. Idempotent: cancelling twice is a no-op.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the job has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_idempotent() {
        let handle = JobHandle::new(CancellationToken::new());
        assert!(!handle.is_cancelled());
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
    }
}
