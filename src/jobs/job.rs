//! # Scheduled job abstraction.
//!
//! A [`Job`] is the zero-argument operation body of a scheduled job. Jobs run
//! on their own timer-driven triggers, independently of the phase pipeline,
//! and may execute concurrently with phase operations or with each other; any
//! needed mutual exclusion is the job body's own responsibility.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::OpError;

/// # One firing of a scheduled job.
///
/// Invoked by the scheduler at each trigger. An error return is reported to
/// the log sink; it never tears down the schedule.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use servisor::{Job, OpError};
///
/// struct Heartbeat;
///
/// #[async_trait]
/// impl Job for Heartbeat {
///     async fn run(&self) -> Result<(), OpError> {
///         // ping the upstream...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Job: Send + Sync + 'static {
    /// Executes one firing of the job.
    async fn run(&self) -> Result<(), OpError>;
}

/// Shared reference to a job.
pub type JobRef = Arc<dyn Job>;
