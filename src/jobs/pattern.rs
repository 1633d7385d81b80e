//! Schedule patterns for recurring jobs.
//!
//! A pattern is either a bare cron expression or a cron rule bounded by an
//! explicit activity window. The pattern itself is just data; parsing and
//! validation happen when a scheduler installs the job.

use chrono::{DateTime, Utc};

/// When a scheduled job fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulePattern {
    /// A cron expression (seconds-resolution, `sec min hour dom mon dow`).
    Cron(String),

    /// A cron rule active only inside `[start, end)`. Open bounds mean
    /// "from now" / "forever".
    Window {
        /// First instant the rule may fire at (inclusive), if bounded.
        start: Option<DateTime<Utc>>,
        /// Instant after which the job stops firing (exclusive), if bounded.
        end: Option<DateTime<Utc>>,
        /// The cron rule evaluated inside the window.
        rule: String,
    },
}

impl SchedulePattern {
    /// Shorthand for a bare cron pattern.
    pub fn cron(rule: impl Into<String>) -> Self {
        SchedulePattern::Cron(rule.into())
    }

    /// The cron rule regardless of variant.
    pub fn rule(&self) -> &str {
        match self {
            SchedulePattern::Cron(rule) => rule,
            SchedulePattern::Window { rule, .. } => rule,
        }
    }

    /// Window bounds; `(None, None)` for a bare cron pattern.
    pub fn bounds(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        match self {
            SchedulePattern::Cron(_) => (None, None),
            SchedulePattern::Window { start, end, .. } => (*start, *end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_and_bounds() {
        let p = SchedulePattern::cron("0 0 * * * *");
        assert_eq!(p.rule(), "0 0 * * * *");
        assert_eq!(p.bounds(), (None, None));

        let end = Utc::now();
        let p = SchedulePattern::Window {
            start: None,
            end: Some(end),
            rule: "* * * * * *".into(),
        };
        assert_eq!(p.rule(), "* * * * * *");
        assert_eq!(p.bounds(), (None, Some(end)));
    }
}
