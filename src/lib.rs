//! # servisor
//!
//! **Servisor** is a bootstrap layer for long-running network services.
//!
//! It provides two things: a configuration resolution pipeline (defaults,
//! caller overrides, environment variables, an on-disk secret store) and a
//! staged lifecycle orchestrator that drives a service from construction
//! through listening to graceful termination. HTTP, scheduling timers, and
//! log output are collaborator concerns behind narrow traits; the crate is
//! designed as a building block under an application's own server stack.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!      defaults    overrides    environment    secret store
//!          │           │             │              │
//!          └──── deep_merge ── apply_overrides ─ resolve ──► effective config
//!                                                                  │
//! ┌────────────────────────────────────────────────────────────────▼──────┐
//! │  Orchestrator                                                         │
//! │  - phase lists   (initialization … pre-terminate, in order)           │
//! │  - ScheduleRegistry (pending JobSpecs, drained at activation)         │
//! │  - runtime table (job name → JobHandle)                               │
//! │  - ShutdownController (signals, faults, explicit exit)                │
//! └──────┬───────────────────┬────────────────────┬───────────────────────┘
//!        ▼                   ▼                    ▼
//!   Service (HTTP)     Scheduler (timers)    LogSink (severities)
//!   health/static/     CronScheduler:        TracingSink ─► tracing
//!   fallback/listen    one driver per job    NullSink    ─► logger off
//! ```
//!
//! ### Lifecycle
//! ```text
//! Orchestrator::run()
//!   ├─► resolve configuration (never starts partially configured)
//!   ├─► initialization   health endpoint + registered ops
//!   ├─► pre-process      registered ops, in order; failure aborts
//!   ├─► process          registered ops (route registration)
//!   ├─► wrap-up          static mounts, fallback, ops, schedule activation
//!   ├─► post-process     registered ops; failures logged, never fatal
//!   ├─► listen(port)     info logged once on success
//!   ├─► Running          until signal / fault / exit request
//!   └─► Terminating
//!         ├─ fault? log fatal exactly once
//!         ├─ pre-terminate ops (exactly once, whatever the trigger)
//!         ├─ cancel every runtime job handle
//!         └─ ExitOutcome { cause } ─► exit code
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Configuration** | Layered resolution with typed env overrides and secrets.     | [`deep_merge`], [`coerce`], [`SecretDescriptor`] |
//! | **Lifecycle**     | Staged startup/shutdown with strict ordering.                | [`Orchestrator`], [`Phase`], [`Context`]    |
//! | **Scheduling**    | Cron-driven jobs with per-name cancel handles.               | [`JobSpec`], [`SchedulePattern`], [`CronScheduler`] |
//! | **Termination**   | Injected shutdown capability, signal mapping, exit codes.    | [`ShutdownController`], [`ExitOutcome`]     |
//! | **Collaborators** | Narrow seams for the server, timers, and logging.            | [`Service`], [`Scheduler`], [`LogSink`]     |
//! | **Errors**        | Typed errors per pipeline stage.                             | [`BootError`], [`PhaseError`], [`OpError`]  |
//!
//! ## Example
//! ```no_run
//! use serde_json::json;
//! use servisor::{Context, OpFn, Orchestrator, Phase};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orch = Orchestrator::builder(json!({ "listen": 3000 })).build();
//!
//!     orch.add_operation(
//!         Phase::PreProcess,
//!         OpFn::arc("connect-db", |cx: Context| async move {
//!             let _dsn = cx.config()["sql"]["connection"]["host"].clone();
//!             // open the pool...
//!             Ok(())
//!         }),
//!     );
//!
//!     let outcome = orch.run().await?;
//!     std::process::exit(outcome.exit_code());
//! }
//! ```

mod config;
mod core;
mod error;
mod jobs;
mod logger;
mod ops;
mod service;

// ---- Public re-exports ----

pub use config::{
    apply_overrides, built_in_defaults, coerce, deep_merge, process_env, resolver, secret,
    SecretDescriptor,
};
pub use core::{
    Context, ExitOutcome, LifecycleState, Orchestrator, OrchestratorBuilder, Phase,
    ShutdownController, TerminationCause,
};
pub use error::{
    BootError, ConfigError, FatalFault, OpError, PhaseError, ScheduleError,
};
pub use jobs::{
    Activation, CronScheduler, Job, JobFn, JobHandle, JobRef, JobSpec, SchedulePattern,
    ScheduleRegistry, Scheduler,
};
pub use logger::{effective_sink, LogSink, NullSink, TracingSink};
pub use ops::{OpFn, OpRef, PhaseOp};
pub use service::{Fallback, FallbackFn, NullService, Service};
