//! Runtime context handed to phase operations.
//!
//! A cheap-to-clone bundle of the resolved configuration snapshot and the
//! shutdown capability. The configuration is immutable from the first phase
//! on; operations read it, they never re-resolve.

use std::sync::Arc;

use serde_json::Value;

use crate::core::shutdown::{ShutdownController, TerminationCause};

/// What a phase operation sees of the runtime.
#[derive(Clone)]
pub struct Context {
    config: Arc<Value>,
    shutdown: ShutdownController,
}

impl Context {
    pub(crate) fn new(config: Arc<Value>, shutdown: ShutdownController) -> Self {
        Self { config, shutdown }
    }

    /// The resolved configuration snapshot.
    pub fn config(&self) -> &Value {
        &self.config
    }

    /// The shutdown capability; clone it into jobs that may request exit.
    pub fn shutdown(&self) -> &ShutdownController {
        &self.shutdown
    }

    /// Requests a graceful exit ([`TerminationCause::Exit`]).
    pub fn request_exit(&self) {
        self.shutdown.trigger(TerminationCause::Exit);
    }
}
