//! Builder for constructing an [`Orchestrator`] with optional collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::config::process_env;
use crate::core::orchestrator::Orchestrator;
use crate::jobs::{CronScheduler, Scheduler};
use crate::logger::{LogSink, TracingSink};
use crate::service::{FallbackFn, NullService, Service};

/// Builder for an [`Orchestrator`].
///
/// Every collaborator has a default: [`NullService`], [`TracingSink`], the
/// built-in [`CronScheduler`], the real process environment, and OS signal
/// installation. Tests typically swap in recording collaborators, an empty
/// environment snapshot, and skip signals.
pub struct OrchestratorBuilder {
    overrides: Value,
    env: Option<HashMap<String, String>>,
    service: Option<Arc<dyn Service>>,
    scheduler: Option<Arc<dyn Scheduler>>,
    sink: Option<Arc<dyn LogSink>>,
    fallback: Option<FallbackFn>,
    install_signals: bool,
}

impl OrchestratorBuilder {
    /// Creates a builder with the caller's configuration overrides.
    pub fn new(overrides: Value) -> Self {
        Self {
            overrides,
            env: None,
            service: None,
            scheduler: None,
            sink: None,
            fallback: None,
            install_signals: true,
        }
    }

    /// Sets the external service collaborator.
    pub fn with_service(mut self, service: Arc<dyn Service>) -> Self {
        self.service = Some(service);
        self
    }

    /// Sets the scheduler collaborator.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Sets the log sink collaborator.
    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Sets the caller-supplied fallback handler (`handle404.type = "function"`).
    pub fn with_fallback_handler(mut self, handler: FallbackFn) -> Self {
        self.fallback = Some(handler);
        self
    }

    /// Injects an environment snapshot instead of the real process environment.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }

    /// Skips OS signal installation; termination is then driven only through
    /// the orchestrator's [`ShutdownController`](crate::ShutdownController).
    pub fn without_signals(mut self) -> Self {
        self.install_signals = false;
        self
    }

    /// Builds the orchestrator.
    pub fn build(self) -> Orchestrator {
        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink));
        let scheduler = self
            .scheduler
            .unwrap_or_else(|| Arc::new(CronScheduler::new(sink.clone())));

        Orchestrator::new_internal(
            self.overrides,
            self.env.unwrap_or_else(process_env),
            self.service.unwrap_or_else(|| Arc::new(NullService)),
            scheduler,
            sink,
            self.fallback,
            self.install_signals,
        )
    }
}
