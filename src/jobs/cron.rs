//! # Built-in cron scheduler.
//!
//! Drives each installed job with its own spawned loop: parse the rule once,
//! sleep until the next fire instant, run the job, repeat. Window bounds are
//! honored around every firing and cancellation is observed while sleeping.
//!
//! ## Flow
//! ```text
//! install(spec)
//!     │ parse rule ──► ScheduleError::InvalidPattern on failure
//!     ▼
//! spawn driver loop:
//!     ┌─► before window start? fire times clamp to start
//!     │   past window end?     loop exits, job never fires again
//!     │   sleep until next ──► cancelled while sleeping? exit
//!     │   run job ──► Err is reported to the sink, schedule survives
//!     │            ──► panic is caught, reported fatal, schedule survives
//!     └───┘
//! ```
//!
//! ## Rules
//! - One driver task per installed job; drivers never share state.
//! - A job error never tears down its schedule; neither does a job panic -
//!   panics are caught in the driver and reported at fatal severity.
//! - Cancellation is cooperative via the handle's token.

use std::panic::AssertUnwindSafe;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cron::Schedule;
use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::error::ScheduleError;
use crate::jobs::job::JobRef;
use crate::jobs::scheduler::{JobHandle, Scheduler};
use crate::jobs::spec::JobSpec;
use crate::logger::LogSink;

/// Timer-driven scheduler backed by cron expressions.
pub struct CronScheduler {
    sink: Arc<dyn LogSink>,
}

impl CronScheduler {
    /// Creates a scheduler reporting job failures to `sink`.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl Scheduler for CronScheduler {
    fn install(&self, spec: &JobSpec) -> Result<JobHandle, ScheduleError> {
        let schedule =
            Schedule::from_str(spec.pattern().rule()).map_err(|e| ScheduleError::InvalidPattern {
                job: spec.name().to_string(),
                reason: e.to_string(),
            })?;
        let (start, end) = spec.pattern().bounds();

        let token = CancellationToken::new();
        let driver = Driver {
            name: spec.name().to_string(),
            schedule,
            start,
            end,
            job: spec.job().clone(),
            sink: self.sink.clone(),
            token: token.clone(),
        };
        tokio::spawn(driver.run());

        Ok(JobHandle::new(token))
    }
}

/// Per-job driver loop; owns everything it needs.
struct Driver {
    name: String,
    schedule: Schedule,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    job: JobRef,
    sink: Arc<dyn LogSink>,
    token: CancellationToken,
}

impl Driver {
    async fn run(self) {
        loop {
            if self.token.is_cancelled() {
                return;
            }

            let now = Utc::now();
            if let Some(end) = self.end {
                if now >= end {
                    return;
                }
            }

            // Fire times never precede the window start.
            let from = match self.start {
                Some(start) if start > now => start,
                _ => now,
            };
            let Some(next) = self.schedule.after(&from).next() else {
                return;
            };
            if let Some(end) = self.end {
                if next >= end {
                    return;
                }
            }

            let wait = (next - now).to_std().unwrap_or_default();
            tokio::select! {
                _ = self.token.cancelled() => return,
                _ = tokio::time::sleep(wait) => {}
            }

            match AssertUnwindSafe(self.job.run()).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    self.sink.warn(&format!("job {} failed: {}", self.name, e));
                }
                Err(panic_err) => {
                    let info = {
                        let any = &*panic_err;
                        if let Some(msg) = any.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = any.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        }
                    };
                    self.sink
                        .fatal(&format!("job {} panicked: {info}", self.name));
                }
            }
        }
    }
}
