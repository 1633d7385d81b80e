//! # Lifecycle core - orchestrator, phases, and shutdown.
//!
//! This module provides the runtime driver:
//! - [`Orchestrator`] / [`OrchestratorBuilder`] - top-level lifecycle driver
//! - [`Phase`] / [`LifecycleState`] - the fixed phase order and run state
//! - [`Context`] - what phase operations see of the runtime
//! - [`ShutdownController`] / [`TerminationCause`] / [`ExitOutcome`] -
//!   explicit termination capability and its outcome
//! - [`signals`] - OS signal mapping onto termination causes

mod builder;
mod context;
mod orchestrator;
mod phases;
mod shutdown;

pub mod signals;

pub use builder::OrchestratorBuilder;
pub use context::Context;
pub use orchestrator::Orchestrator;
pub use phases::{LifecycleState, Phase};
pub use shutdown::{ExitOutcome, ShutdownController, TerminationCause};
