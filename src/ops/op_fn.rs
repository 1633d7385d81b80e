//! # Function-backed phase operation (`OpFn`)
//!
//! [`OpFn`] wraps a closure `F: Fn(Context) -> Fut`, producing a fresh future
//! per execution. No shared mutable state is implied; if an operation needs
//! shared state, capture an `Arc<...>` explicitly inside the closure.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::Context;
use crate::error::OpError;
use crate::ops::op::PhaseOp;

/// Function-backed phase operation.
///
/// Wraps a closure that *creates* a new future per run.
pub struct OpFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> OpFn<F> {
    /// Creates a new function-backed operation.
    ///
    /// Prefer [`OpFn::arc`] when you immediately need an [`OpRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the operation and returns it as a shared handle
    /// (`Arc<dyn PhaseOp>`).
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> PhaseOp for OpFn<F>
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), OpError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, cx: &Context) -> Result<(), OpError> {
        (self.f)(cx.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_fn_reports_its_name() {
        let op = OpFn::arc("migrate", |_cx: Context| async { Ok(()) });
        assert_eq!(op.name(), "migrate");
    }
}
