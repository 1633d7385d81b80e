//! Job specification bundling a name, a schedule pattern, and the operation.

use std::borrow::Cow;

use crate::jobs::job::JobRef;
use crate::jobs::pattern::SchedulePattern;

/// Named schedule descriptor.
///
/// `name` is unique within the runtime table: re-registering the same name
/// before activation replaces the prior descriptor; after activation the
/// active job must be cancelled first.
#[derive(Clone)]
pub struct JobSpec {
    name: Cow<'static, str>,
    pattern: SchedulePattern,
    job: JobRef,
}

impl JobSpec {
    /// Creates a new job specification.
    pub fn new(name: impl Into<Cow<'static, str>>, pattern: SchedulePattern, job: JobRef) -> Self {
        Self {
            name: name.into(),
            pattern,
            job,
        }
    }

    /// The unique job name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schedule pattern.
    pub fn pattern(&self) -> &SchedulePattern {
        &self.pattern
    }

    /// The operation fired at each trigger.
    pub fn job(&self) -> &JobRef {
        &self.job
    }
}

impl std::fmt::Debug for JobSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobSpec")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}
