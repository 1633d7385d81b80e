//! # Schedule registry - pending job descriptors and their activation.
//!
//! Holds [`JobSpec`]s registered before activation and installs them into the
//! scheduler collaborator exactly once, handing the resulting cancel handles
//! to the caller's runtime table.
//!
//! ## Rules
//! - Last registration wins per name until activation drains the registry.
//! - Activation installs every pending spec; one job's install failure never
//!   blocks installing the others.
//! - Registration order is preserved at activation.

use crate::error::ScheduleError;
use crate::jobs::scheduler::{JobHandle, Scheduler};
use crate::jobs::spec::JobSpec;

/// Pending job descriptors awaiting activation.
#[derive(Default)]
pub struct ScheduleRegistry {
    pending: Vec<JobSpec>,
}

/// Result of draining the registry into a live scheduler.
pub struct Activation {
    /// Successfully installed jobs: `(name, cancel handle)` in registration order.
    pub installed: Vec<(String, JobHandle)>,
    /// Per-job install failures.
    pub failures: Vec<ScheduleError>,
}

impl ScheduleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a spec; an earlier spec with the same name is replaced in place.
    pub fn register(&mut self, spec: JobSpec) {
        match self.pending.iter_mut().find(|p| p.name() == spec.name()) {
            Some(slot) => *slot = spec,
            None => self.pending.push(spec),
        }
    }

    /// Whether a spec with this name is pending.
    pub fn contains(&self, name: &str) -> bool {
        self.pending.iter().any(|p| p.name() == name)
    }

    /// Number of pending specs.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the registry holds no pending specs.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drains every pending spec into `scheduler`.
    pub fn activate(&mut self, scheduler: &dyn Scheduler) -> Activation {
        let mut installed = Vec::new();
        let mut failures = Vec::new();
        for spec in self.pending.drain(..) {
            match scheduler.install(&spec) {
                Ok(handle) => installed.push((spec.name().to_string(), handle)),
                Err(e) => failures.push(e),
            }
        }
        Activation {
            installed,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tokio_util::sync::CancellationToken;

    use crate::jobs::job_fn::JobFn;
    use crate::jobs::pattern::SchedulePattern;

    /// Scheduler stub that rejects names starting with "bad".
    struct PickyScheduler;

    impl Scheduler for PickyScheduler {
        fn install(&self, spec: &JobSpec) -> Result<JobHandle, ScheduleError> {
            if spec.name().starts_with("bad") {
                return Err(ScheduleError::InvalidPattern {
                    job: spec.name().to_string(),
                    reason: "rejected".into(),
                });
            }
            Ok(JobHandle::new(CancellationToken::new()))
        }
    }

    fn spec(name: &'static str) -> JobSpec {
        JobSpec::new(
            name,
            SchedulePattern::cron("* * * * * *"),
            JobFn::arc(|| async { Ok(()) }),
        )
    }

    #[test]
    fn test_last_registration_wins_per_name() {
        let mut reg = ScheduleRegistry::new();
        reg.register(spec("tick"));
        reg.register(spec("tock"));
        reg.register(spec("tick"));
        assert_eq!(reg.len(), 2);
        assert!(reg.contains("tick"));
    }

    #[test]
    fn test_one_failure_does_not_block_the_others() {
        let mut reg = ScheduleRegistry::new();
        reg.register(spec("ok-1"));
        reg.register(spec("bad-2"));
        reg.register(spec("ok-3"));

        let outcome = reg.activate(&PickyScheduler);
        let names: Vec<&str> = outcome.installed.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["ok-1", "ok-3"]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].job(), "bad-2");

        // Activation drained everything, including the failed spec.
        assert!(reg.is_empty());
    }

    #[test]
    fn test_arc_scheduler_also_works_via_deref() {
        let mut reg = ScheduleRegistry::new();
        reg.register(spec("tick"));
        let scheduler: Arc<dyn Scheduler> = Arc::new(PickyScheduler);
        let outcome = reg.activate(scheduler.as_ref());
        assert_eq!(outcome.installed.len(), 1);
    }
}
