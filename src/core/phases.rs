//! Lifecycle phases and orchestrator states.
//!
//! [`Phase`] names the six registration points of the startup/shutdown
//! pipeline; [`LifecycleState`] is the orchestrator's coarser run state. The
//! phase order is fixed and public so callers can reason about what runs
//! before what.

use std::fmt;

/// A registration point in the lifecycle pipeline.
///
/// Operations registered against a phase run strictly in registration order
/// when the orchestrator reaches that phase. `PreTerminate` is special: it
/// runs at most once, only during shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Config finalization and health-check registration.
    Initialization,
    /// Caller setup that must precede route registration.
    PreProcess,
    /// Route/handler registration via the service collaborator.
    Process,
    /// Fallback selection, schedule activation, listener start.
    WrapUp,
    /// Best-effort cleanup; failures are logged, not fatal.
    PostProcess,
    /// Shutdown work; runs exactly once regardless of the trigger.
    PreTerminate,
}

impl Phase {
    /// All phases in execution order.
    pub const ORDER: [Phase; 6] = [
        Phase::Initialization,
        Phase::PreProcess,
        Phase::Process,
        Phase::WrapUp,
        Phase::PostProcess,
        Phase::PreTerminate,
    ];

    /// The startup phases, in order (everything but `PreTerminate`).
    pub const STARTUP: [Phase; 5] = [
        Phase::Initialization,
        Phase::PreProcess,
        Phase::Process,
        Phase::WrapUp,
        Phase::PostProcess,
    ];

    /// The conventional hyphenated phase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Initialization => "initialization",
            Phase::PreProcess => "pre-process",
            Phase::Process => "process",
            Phase::WrapUp => "wrap-up",
            Phase::PostProcess => "post-process",
            Phase::PreTerminate => "pre-terminate",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse orchestrator state, advanced only by `run()` and termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Built, `run()` not yet called.
    Constructed,
    /// Configuration resolution in progress.
    Resolving,
    /// A startup phase is executing.
    Starting(Phase),
    /// Listener started; steady state.
    Running,
    /// Termination triggered; pre-terminate ops running.
    Terminating,
    /// Clean exit.
    Terminated,
    /// Startup aborted; a new instance is required to restart.
    Failed,
}
