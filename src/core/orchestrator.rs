//! # Lifecycle orchestrator - the top-level driver.
//!
//! Owns the resolved configuration, the per-phase operation lists, and the
//! runtime table of active job handles. `run()` drives the whole lifecycle:
//!
//! ```text
//! Constructed ─► Resolving ─► initialization ─► pre-process ─► process
//!                                                                 │
//!        ┌────────────────────────────────────────────────────────┘
//!        ▼
//!     wrap-up (fallback, schedule activation, listener) ─► post-process
//!        │                                                      │
//!        ▼                                                      ▼
//!     Running ───────(signal / fault / exit request)────► Terminating
//!                                                               │
//!                                          pre-terminate (once) │
//!                                          cancel job handles   ▼
//!                                                          Terminated
//! ```
//!
//! ## Rules
//! - Operations within a phase run strictly in registration order, awaited
//!   sequentially; no timeout is imposed - a hung operation blocks startup.
//! - A failure in any startup phase except post-process rejects `run()` and
//!   leaves the orchestrator failed and non-restartable.
//! - Post-process failures are logged through the sink, never fatal; every
//!   post-process op runs regardless of earlier failures in the phase.
//! - Pre-terminate operations run exactly once, whatever the trigger; their
//!   failures are reported and never block shutdown.
//! - A fault is logged at fatal severity exactly once, before pre-terminate.
//! - `run()` resolves configuration first; the orchestrator never starts
//!   partially configured.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::config::{built_in_defaults, resolver};
use crate::core::builder::OrchestratorBuilder;
use crate::core::context::Context;
use crate::core::phases::{LifecycleState, Phase};
use crate::core::shutdown::{ExitOutcome, ShutdownController, TerminationCause};
use crate::error::{BootError, PhaseError, ScheduleError};
use crate::jobs::{JobHandle, JobRef, JobSpec, SchedulePattern, ScheduleRegistry, Scheduler};
use crate::logger::{effective_sink, LogSink};
use crate::ops::OpRef;
use crate::service::{Fallback, FallbackFn, Service};

/// Top-level lifecycle driver. Construct via [`Orchestrator::builder`].
pub struct Orchestrator {
    overrides: Value,
    env: HashMap<String, String>,
    service: Arc<dyn Service>,
    scheduler: Arc<dyn Scheduler>,
    sink: Arc<dyn LogSink>,
    fallback: Option<FallbackFn>,
    install_signals: bool,

    phases: Mutex<HashMap<Phase, Vec<OpRef>>>,
    registry: Mutex<ScheduleRegistry>,
    runtime: Mutex<HashMap<String, JobHandle>>,
    state: Mutex<LifecycleState>,
    shutdown: ShutdownController,
    activated: AtomicBool,
    pre_terminated: AtomicBool,
    ran: AtomicBool,
}

impl Orchestrator {
    /// Starts a builder with the caller's configuration overrides.
    pub fn builder(overrides: Value) -> OrchestratorBuilder {
        OrchestratorBuilder::new(overrides)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_internal(
        overrides: Value,
        env: HashMap<String, String>,
        service: Arc<dyn Service>,
        scheduler: Arc<dyn Scheduler>,
        sink: Arc<dyn LogSink>,
        fallback: Option<FallbackFn>,
        install_signals: bool,
    ) -> Self {
        Self {
            overrides,
            env,
            service,
            scheduler,
            sink,
            fallback,
            install_signals,
            phases: Mutex::new(HashMap::new()),
            registry: Mutex::new(ScheduleRegistry::new()),
            runtime: Mutex::new(HashMap::new()),
            state: Mutex::new(LifecycleState::Constructed),
            shutdown: ShutdownController::new(),
            activated: AtomicBool::new(false),
            pre_terminated: AtomicBool::new(false),
            ran: AtomicBool::new(false),
        }
    }

    /// Registers an operation against a lifecycle phase.
    ///
    /// Operations run in registration order when the phase executes.
    pub fn add_operation(&self, phase: Phase, op: OpRef) {
        let mut phases = lock(&self.phases);
        phases.entry(phase).or_default().push(op);
    }

    /// Registers a scheduled job.
    ///
    /// Before activation the descriptor is pending and re-registering the
    /// same name replaces it. After activation the job is installed into the
    /// scheduler immediately; a name that is still active must be cancelled
    /// via [`cancel_schedule`](Self::cancel_schedule) first.
    pub fn schedule_job(
        &self,
        name: impl Into<String>,
        pattern: SchedulePattern,
        job: JobRef,
    ) -> Result<(), ScheduleError> {
        let name = name.into();
        if lock(&self.runtime).contains_key(&name) {
            return Err(ScheduleError::AlreadyActive { job: name });
        }

        let spec = JobSpec::new(name.clone(), pattern, job);
        if !self.activated.load(Ordering::SeqCst) {
            lock(&self.registry).register(spec);
            return Ok(());
        }

        let handle = self.scheduler.install(&spec)?;
        lock(&self.runtime).insert(name, handle);
        Ok(())
    }

    /// Cancels the named job's runtime handle, bracketed by optional actions.
    ///
    /// Runs `pre`, cancels the handle if present (no-op if absent or already
    /// cancelled), then runs `post`. Action errors are reported to the sink.
    /// Does not transition the lifecycle state.
    pub async fn cancel_schedule(&self, name: &str, pre: Option<JobRef>, post: Option<JobRef>) {
        if let Some(action) = pre {
            if let Err(e) = action.run().await {
                self.sink
                    .warn(&format!("cancel {name}: pre-action failed: {e}"));
            }
        }

        if let Some(handle) = lock(&self.runtime).remove(name) {
            handle.cancel();
        }

        if let Some(action) = post {
            if let Err(e) = action.run().await {
                self.sink
                    .warn(&format!("cancel {name}: post-action failed: {e}"));
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        *lock(&self.state)
    }

    /// The shutdown capability; clone it to drive termination externally.
    pub fn shutdown(&self) -> ShutdownController {
        self.shutdown.clone()
    }

    /// Drives the whole lifecycle; resolves once the service has terminated.
    ///
    /// Callable once per instance: a second call returns
    /// [`BootError::AlreadyRan`], and a startup failure leaves the
    /// orchestrator failed and non-restartable.
    pub async fn run(&self) -> Result<ExitOutcome, BootError> {
        if self.ran.swap(true, Ordering::SeqCst) {
            return Err(BootError::AlreadyRan);
        }

        self.set_state(LifecycleState::Resolving);
        let config = match resolver::resolve(&built_in_defaults(), &self.overrides, &self.env).await
        {
            Ok(config) => Arc::new(config),
            Err(e) => {
                self.set_state(LifecycleState::Failed);
                return Err(e.into());
            }
        };

        let sink = effective_sink(&config, self.sink.clone());
        let cx = Context::new(config.clone(), self.shutdown.clone());
        if self.install_signals {
            self.shutdown.install_signals();
        }

        if let Err(e) = self.startup(&config, &cx, &sink).await {
            self.set_state(LifecycleState::Failed);
            return Err(e.into());
        }

        self.set_state(LifecycleState::Running);
        self.shutdown.cancelled().await;

        Ok(self.terminate(&cx, &sink).await)
    }

    /// Startup sequence: every phase from initialization through listen.
    async fn startup(
        &self,
        config: &Value,
        cx: &Context,
        sink: &Arc<dyn LogSink>,
    ) -> Result<(), PhaseError> {
        // Initialization: baseline health endpoint, then registered ops.
        self.set_state(LifecycleState::Starting(Phase::Initialization));
        self.service
            .register_health()
            .await
            .map_err(|e| PhaseError {
                phase: Phase::Initialization,
                source: e,
            })?;
        self.run_ops(Phase::Initialization, cx, sink).await?;

        self.set_state(LifecycleState::Starting(Phase::PreProcess));
        self.run_ops(Phase::PreProcess, cx, sink).await?;
        self.set_state(LifecycleState::Starting(Phase::Process));
        self.run_ops(Phase::Process, cx, sink).await?;

        // WrapUp: static mounts, fallback, registered ops, schedules.
        self.set_state(LifecycleState::Starting(Phase::WrapUp));
        self.mount_static(config).await?;
        self.install_fallback(config, sink).await?;
        self.run_ops(Phase::WrapUp, cx, sink).await?;
        self.activate_schedules(config, sink);

        // PostProcess is best-effort: every op runs, failures are reported.
        self.set_state(LifecycleState::Starting(Phase::PostProcess));
        self.run_ops_best_effort(Phase::PostProcess, cx, sink).await;

        let port = config.get("listen").and_then(Value::as_u64).unwrap_or(8080) as u16;
        self.service.listen(port).await.map_err(|e| PhaseError {
            phase: Phase::WrapUp,
            source: e,
        })?;
        sink.info(&format!("listening on port {port}"));
        Ok(())
    }

    /// Runs every operation registered for `phase`, in registration order;
    /// the first failure aborts the phase. Does not touch lifecycle state.
    async fn run_ops(
        &self,
        phase: Phase,
        cx: &Context,
        sink: &Arc<dyn LogSink>,
    ) -> Result<(), PhaseError> {
        let ops: Vec<OpRef> = lock(&self.phases).get(&phase).cloned().unwrap_or_default();
        for op in ops {
            sink.trace(&format!("{phase}: running {}", op.name()));
            op.run(cx).await.map_err(|source| PhaseError { phase, source })?;
        }
        Ok(())
    }

    /// Best-effort variant: every operation runs, each failure is reported
    /// through the sink and the rest of the phase continues.
    async fn run_ops_best_effort(&self, phase: Phase, cx: &Context, sink: &Arc<dyn LogSink>) {
        let ops: Vec<OpRef> = lock(&self.phases).get(&phase).cloned().unwrap_or_default();
        for op in ops {
            sink.trace(&format!("{phase}: running {}", op.name()));
            if let Err(source) = op.run(cx).await {
                sink.error(&PhaseError { phase, source }.to_string());
            }
        }
    }

    async fn mount_static(&self, config: &Value) -> Result<(), PhaseError> {
        for kind in ["html", "file"] {
            let mounts = config
                .pointer(&format!("/serve_static/{kind}"))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            for mount in mounts.iter().filter_map(Value::as_str) {
                self.service
                    .serve_static(Path::new(mount))
                    .await
                    .map_err(|e| PhaseError {
                        phase: Phase::WrapUp,
                        source: e,
                    })?;
            }
        }
        Ok(())
    }

    async fn install_fallback(
        &self,
        config: &Value,
        sink: &Arc<dyn LogSink>,
    ) -> Result<(), PhaseError> {
        let (fallback, warning) = Fallback::from_config(config, self.fallback.clone());
        if let Some(warning) = warning {
            sink.warn(warning);
        }
        self.service
            .register_fallback(fallback)
            .await
            .map_err(|e| PhaseError {
                phase: Phase::WrapUp,
                source: e,
            })
    }

    /// Installs every pending job descriptor; per-job failures are reported
    /// and never block the others. Skipped entirely on non-master replicas.
    fn activate_schedules(&self, config: &Value, sink: &Arc<dyn LogSink>) {
        // Non-master replicas never activate: `activated` stays false, so
        // later `schedule_job` calls keep landing in the pending registry
        // instead of installing live jobs.
        if config.get("master").and_then(Value::as_bool) == Some(false) {
            sink.debug("not a master replica; pending schedules stay inactive");
            return;
        }
        self.activated.store(true, Ordering::SeqCst);

        let outcome = lock(&self.registry).activate(self.scheduler.as_ref());
        for failure in &outcome.failures {
            sink.warn(&format!("schedule activation: {failure}"));
        }
        if !outcome.installed.is_empty() {
            sink.info(&format!("activated {} schedule(s)", outcome.installed.len()));
        }

        let mut runtime = lock(&self.runtime);
        for (name, handle) in outcome.installed {
            runtime.insert(name, handle);
        }
    }

    /// Termination sequence: fatal log, exactly-once pre-terminate, handle
    /// cancellation.
    async fn terminate(&self, cx: &Context, sink: &Arc<dyn LogSink>) -> ExitOutcome {
        self.set_state(LifecycleState::Terminating);
        let cause = self.shutdown.cause().unwrap_or(TerminationCause::Exit);

        if let TerminationCause::Fault(fault) = &cause {
            sink.fatal(&fault.to_string());
        }

        if !self.pre_terminated.swap(true, Ordering::SeqCst) {
            // Shutdown must proceed whatever these ops do; the state stays
            // Terminating throughout.
            self.run_ops_best_effort(Phase::PreTerminate, cx, sink).await;
        }

        let handles: Vec<(String, JobHandle)> = lock(&self.runtime).drain().collect();
        for (name, handle) in handles {
            sink.debug(&format!("cancelling job {name}"));
            handle.cancel();
        }

        self.set_state(LifecycleState::Terminated);
        ExitOutcome::new(cause)
    }

    fn set_state(&self, next: LifecycleState) {
        *lock(&self.state) = next;
    }
}

/// Poisoning only happens if a panic escaped a lock holder; the lifecycle
/// data stays usable, so continue with the inner value.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;

    use crate::error::OpError;
    use crate::jobs::JobFn;
    use crate::ops::OpFn;

    /// Sink recording every line with its severity.
    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<(&'static str, String)>>,
    }

    impl RecordingSink {
        fn lines(&self) -> Vec<(&'static str, String)> {
            lock(&self.lines).clone()
        }

        fn count(&self, level: &str) -> usize {
            self.lines().iter().filter(|(l, _)| *l == level).count()
        }

        fn record(&self, level: &'static str, msg: &str) {
            lock(&self.lines).push((level, msg.to_string()));
        }
    }

    impl LogSink for RecordingSink {
        fn trace(&self, msg: &str) {
            self.record("trace", msg);
        }
        fn debug(&self, msg: &str) {
            self.record("debug", msg);
        }
        fn info(&self, msg: &str) {
            self.record("info", msg);
        }
        fn warn(&self, msg: &str) {
            self.record("warn", msg);
        }
        fn error(&self, msg: &str) {
            self.record("error", msg);
        }
        fn fatal(&self, msg: &str) {
            self.record("fatal", msg);
        }
    }

    /// Service recording the order of calls made into it.
    #[derive(Default)]
    struct MockService {
        calls: Mutex<Vec<String>>,
    }

    impl MockService {
        fn calls(&self) -> Vec<String> {
            lock(&self.calls).clone()
        }
    }

    #[async_trait::async_trait]
    impl Service for MockService {
        async fn register_health(&self) -> Result<(), OpError> {
            lock(&self.calls).push("health".into());
            Ok(())
        }

        async fn serve_static(&self, path: &Path) -> Result<(), OpError> {
            lock(&self.calls).push(format!("static:{}", path.display()));
            Ok(())
        }

        async fn register_fallback(&self, fallback: Fallback) -> Result<(), OpError> {
            lock(&self.calls).push(format!("fallback:{}", fallback.mode()));
            Ok(())
        }

        async fn listen(&self, port: u16) -> Result<(), OpError> {
            lock(&self.calls).push(format!("listen:{port}"));
            Ok(())
        }
    }

    fn shared_log() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> OpRef) {
        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let factory = {
            let log = log.clone();
            move |name: &'static str| -> OpRef {
                let log = log.clone();
                OpFn::arc(name, move |_cx: Context| {
                    let log = log.clone();
                    async move {
                        lock(&log).push(name);
                        Ok(())
                    }
                })
            }
        };
        (log, factory)
    }

    /// Overrides that keep tests hermetic: no secret file, logger on.
    fn test_overrides() -> Value {
        json!({ "secret": null })
    }

    fn test_orchestrator(
        overrides: Value,
        sink: Arc<RecordingSink>,
        service: Arc<MockService>,
    ) -> Orchestrator {
        Orchestrator::builder(overrides)
            .with_env(HashMap::new())
            .with_service(service)
            .with_log_sink(sink)
            .without_signals()
            .build()
    }

    #[tokio::test]
    async fn test_phase_ordering_within_and_across_phases() {
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(MockService::default());
        let orch = test_orchestrator(test_overrides(), sink, service.clone());

        let (log, op) = shared_log();
        orch.add_operation(Phase::PreProcess, op("a"));
        orch.add_operation(Phase::PreProcess, op("b"));
        orch.add_operation(Phase::PreProcess, op("c"));
        orch.add_operation(Phase::Process, op("route"));
        orch.add_operation(Phase::PostProcess, op("done"));
        // Leave the steady state immediately once startup completes.
        orch.add_operation(
            Phase::PostProcess,
            OpFn::arc("request-exit", |cx: Context| async move {
                cx.request_exit();
                Ok(())
            }),
        );

        let outcome = orch.run().await.expect("clean run");
        assert_eq!(outcome.cause(), &TerminationCause::Exit);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(orch.state(), LifecycleState::Terminated);

        // Pre-process ops in registration order, never interleaved with process.
        assert_eq!(*lock(&log), vec!["a", "b", "c", "route", "done"]);

        // Collaborator calls happen at their assigned points.
        let calls = service.calls();
        assert_eq!(calls.first().map(String::as_str), Some("health"));
        assert!(calls.contains(&"fallback:message".to_string()));
        assert_eq!(calls.last().map(String::as_str), Some("listen:8080"));
    }

    #[tokio::test]
    async fn test_failing_pre_process_aborts_startup() {
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(MockService::default());
        let orch = test_orchestrator(test_overrides(), sink, service.clone());

        let (log, op) = shared_log();
        orch.add_operation(
            Phase::PreProcess,
            OpFn::arc("boom", |_cx: Context| async {
                Err(OpError::failed("db offline"))
            }),
        );
        orch.add_operation(Phase::Process, op("route"));

        let err = orch.run().await.expect_err("startup must fail");
        assert!(err.to_string().contains("pre-process"));
        assert!(err.to_string().contains("db offline"));
        assert_eq!(orch.state(), LifecycleState::Failed);

        // Process never ran, the listener never started.
        assert!(lock(&log).is_empty());
        assert!(!service.calls().iter().any(|c| c.starts_with("listen")));

        // Failed orchestrators are non-restartable.
        let again = orch.run().await.expect_err("second run must be rejected");
        assert_eq!(again.as_label(), "already_ran");
    }

    #[tokio::test]
    async fn test_post_process_failure_is_best_effort() {
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(MockService::default());
        let orch = test_orchestrator(test_overrides(), sink.clone(), service.clone());

        let (log, op) = shared_log();
        orch.add_operation(
            Phase::PostProcess,
            OpFn::arc("flaky-cleanup", |_cx: Context| async {
                Err(OpError::failed("cache flush failed"))
            }),
        );
        orch.add_operation(Phase::PostProcess, op("late-cleanup"));
        orch.add_operation(
            Phase::PostProcess,
            OpFn::arc("request-exit", |cx: Context| async move {
                cx.request_exit();
                Ok(())
            }),
        );

        let outcome = orch.run().await.expect("still a clean run");
        assert_eq!(outcome.exit_code(), 0);

        // The failure surfaced through the sink, the ops registered after it
        // still ran, and the listener still started.
        assert_eq!(sink.count("error"), 1);
        assert_eq!(*lock(&log), vec!["late-cleanup"]);
        assert!(service.calls().iter().any(|c| c == "listen:8080"));
    }

    #[tokio::test]
    async fn test_pre_terminate_observes_terminating_state() {
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(MockService::default());
        let orch = Arc::new(test_orchestrator(test_overrides(), sink, service));

        let seen: Arc<Mutex<Option<LifecycleState>>> = Arc::new(Mutex::new(None));
        let slot = seen.clone();
        let watcher = orch.clone();
        orch.add_operation(
            Phase::PreTerminate,
            OpFn::arc("record-state", move |_cx: Context| {
                let slot = slot.clone();
                let watcher = watcher.clone();
                async move {
                    *lock(&slot) = Some(watcher.state());
                    Ok(())
                }
            }),
        );
        orch.add_operation(
            Phase::PostProcess,
            OpFn::arc("request-exit", |cx: Context| async move {
                cx.request_exit();
                Ok(())
            }),
        );

        orch.run().await.expect("clean run");
        assert_eq!(*lock(&seen), Some(LifecycleState::Terminating));
        assert_eq!(orch.state(), LifecycleState::Terminated);
    }

    #[tokio::test]
    async fn test_fault_logs_fatal_once_and_exits_nonzero() {
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(MockService::default());
        let orch = test_orchestrator(test_overrides(), sink.clone(), service);

        orch.add_operation(
            Phase::PostProcess,
            OpFn::arc("blow-up", |cx: Context| async move {
                cx.shutdown().fault("index out of bounds", "metrics-job");
                Ok(())
            }),
        );
        let (log, op) = shared_log();
        orch.add_operation(Phase::PreTerminate, op("drain"));

        let outcome = orch.run().await.expect("run resolves with an outcome");
        assert_eq!(outcome.exit_code(), 1);
        match outcome.cause() {
            TerminationCause::Fault(fault) => assert_eq!(fault.origin, "metrics-job"),
            other => panic!("expected a fault, got {other:?}"),
        }

        // Fatal exactly once, before pre-terminate ran; pre-terminate ran once.
        assert_eq!(sink.count("fatal"), 1);
        assert_eq!(*lock(&log), vec!["drain"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedules_activate_and_terminate_with_the_run() {
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(MockService::default());
        let orch = Arc::new(test_orchestrator(
            test_overrides(),
            sink.clone(),
            service,
        ));

        let hits = Arc::new(Mutex::new(0usize));
        let counted = hits.clone();
        orch.schedule_job(
            "tick",
            SchedulePattern::cron("* * * * * *"),
            JobFn::arc(move || {
                let counted = counted.clone();
                async move {
                    *lock(&counted) += 1;
                    Ok(())
                }
            }),
        )
        .expect("pending registration");

        let runner = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.run().await })
        };
        while orch.state() != LifecycleState::Running {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        // Re-registering an active name is refused until cancellation.
        let err = orch
            .schedule_job(
                "tick",
                SchedulePattern::cron("* * * * * *"),
                JobFn::arc(|| async { Ok(()) }),
            )
            .expect_err("active name");
        assert_eq!(err.as_label(), "schedule_already_active");

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(*lock(&hits) >= 1);

        // cancel_schedule brackets the cancellation with its actions.
        let (actions, _) = shared_log();
        let pre = {
            let actions = actions.clone();
            JobFn::arc(move || {
                let actions = actions.clone();
                async move {
                    lock(&actions).push("pre");
                    Ok(())
                }
            })
        };
        let post = {
            let actions = actions.clone();
            JobFn::arc(move || {
                let actions = actions.clone();
                async move {
                    lock(&actions).push("post");
                    Ok(())
                }
            })
        };
        orch.cancel_schedule("tick", Some(pre), Some(post)).await;
        assert_eq!(*lock(&actions), vec!["pre", "post"]);

        // The name is free again after cancellation.
        orch.schedule_job(
            "tick",
            SchedulePattern::cron("* * * * * *"),
            JobFn::arc(|| async { Ok(()) }),
        )
        .expect("re-registration after cancel");

        orch.shutdown().trigger(TerminationCause::Interrupt);
        let outcome = runner
            .await
            .expect("runner task")
            .expect("graceful termination");
        assert_eq!(outcome.cause(), &TerminationCause::Interrupt);
        assert_eq!(orch.state(), LifecycleState::Terminated);
    }

    #[tokio::test]
    async fn test_non_master_replica_skips_activation() {
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(MockService::default());
        let orch = test_orchestrator(
            json!({ "secret": null, "master": false }),
            sink,
            service,
        );

        let fired = Arc::new(Mutex::new(false));
        let flag = fired.clone();
        orch.schedule_job(
            "tick",
            SchedulePattern::cron("* * * * * *"),
            JobFn::arc(move || {
                let flag = flag.clone();
                async move {
                    *lock(&flag) = true;
                    Ok(())
                }
            }),
        )
        .expect("pending registration");
        orch.add_operation(
            Phase::PostProcess,
            OpFn::arc("request-exit", |cx: Context| async move {
                cx.request_exit();
                Ok(())
            }),
        );

        orch.run().await.expect("clean run");
        assert!(!*lock(&fired));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_master_replica_keeps_late_schedules_pending() {
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(MockService::default());
        let orch = Arc::new(test_orchestrator(
            json!({ "secret": null, "master": false }),
            sink,
            service,
        ));

        let runner = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.run().await })
        };
        while orch.state() != LifecycleState::Running {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        // Registrations after startup land in the pending registry, never in
        // the live scheduler.
        let hits = Arc::new(Mutex::new(0usize));
        let counted = hits.clone();
        orch.schedule_job(
            "late-tick",
            SchedulePattern::cron("* * * * * *"),
            JobFn::arc(move || {
                let counted = counted.clone();
                async move {
                    *lock(&counted) += 1;
                    Ok(())
                }
            }),
        )
        .expect("pending registration");

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(*lock(&hits), 0);

        orch.shutdown().trigger(TerminationCause::Interrupt);
        runner
            .await
            .expect("runner task")
            .expect("graceful termination");
    }

    #[tokio::test]
    async fn test_logger_off_silences_startup_logging() {
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(MockService::default());
        let orch = test_orchestrator(
            json!({ "secret": null, "logger": { "type": "off" } }),
            sink.clone(),
            service,
        );
        orch.add_operation(
            Phase::PostProcess,
            OpFn::arc("request-exit", |cx: Context| async move {
                cx.request_exit();
                Ok(())
            }),
        );

        orch.run().await.expect("clean run");
        assert!(sink.lines().is_empty());
    }
}
