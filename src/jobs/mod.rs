//! # Scheduled jobs and their activation.
//!
//! This module provides the job-related types:
//! - [`Job`] - trait for implementing async scheduled operations
//! - [`JobFn`] - function-based job implementation
//! - [`JobRef`] - shared reference to a job (`Arc<dyn Job>`)
//! - [`JobSpec`] - descriptor bundling name, pattern, and operation
//! - [`SchedulePattern`] - cron rule, optionally bounded by a window
//! - [`Scheduler`] / [`JobHandle`] - the collaborator seam and cancel handle
//! - [`CronScheduler`] - built-in cron-driven implementation
//! - [`ScheduleRegistry`] - pending descriptors, drained at activation

mod cron;
mod job;
mod job_fn;
mod pattern;
mod registry;
mod scheduler;
mod spec;

pub use cron::CronScheduler;
pub use job::{Job, JobRef};
pub use job_fn::JobFn;
pub use pattern::SchedulePattern;
pub use registry::{Activation, ScheduleRegistry};
pub use scheduler::{JobHandle, Scheduler};
pub use spec::JobSpec;
