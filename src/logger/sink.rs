//! # Core log sink trait
//!
//! `LogSink` is the seam through which the orchestrator reports. The core
//! never formats or colorizes and never writes to stdout itself; it calls one
//! of the six severity sinks and the collaborator decides what to do with the
//! line.
//!
//! ## Contract
//! - `fatal` is called exactly once per uncaught fault, before pre-terminate
//!   operations run.
//! - `info` is called once on a successful listen.
//! - Sinks are synchronous and must not block the async runtime; defer slow
//!   I/O to the collaborator's own machinery.

/// Contract for severity-leveled log sinks.
pub trait LogSink: Send + Sync + 'static {
    /// Finest-grained diagnostics.
    fn trace(&self, msg: &str);

    /// Developer diagnostics.
    fn debug(&self, msg: &str);

    /// Notable runtime milestones (successful listen, schedule activation).
    fn info(&self, msg: &str);

    /// Recoverable anomalies (a job firing failed, a schedule failed to install).
    fn warn(&self, msg: &str);

    /// Failures the service survives (post-process op failure).
    fn error(&self, msg: &str);

    /// Uncaught faults; always followed by termination.
    fn fatal(&self, msg: &str);

    /// Human-readable name (for diagnostics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
