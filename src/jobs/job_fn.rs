//! Function-backed job (`JobFn`)
//!
//! [`JobFn`] wraps a closure `F: Fn() -> Fut`, producing a fresh future per
//! firing. Shared state between firings must be captured as an explicit
//! `Arc<...>` inside the closure.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::OpError;
use crate::jobs::job::Job;

/// Function-backed job implementation.
pub struct JobFn<F> {
    f: F,
}

impl<F> JobFn<F> {
    /// Creates a new function-backed job.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the job and returns it as a shared handle (`Arc<dyn Job>`).
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Job for JobFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), OpError>> + Send + 'static,
{
    async fn run(&self) -> Result<(), OpError> {
        (self.f)().await
    }
}
