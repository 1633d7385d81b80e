//! # Phase operation abstraction.
//!
//! A [`PhaseOp`] is one unit of startup or shutdown work registered against a
//! lifecycle phase. Operations within a phase run strictly in registration
//! order and are awaited sequentially; a hung operation blocks startup, so
//! long-running work belongs in a scheduled job, not a phase op.

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::Context;
use crate::error::OpError;

/// # Asynchronous unit of phase work.
///
/// Receives the runtime [`Context`] (resolved configuration plus the shutdown
/// capability). Returning an error from any phase other than post-process
/// aborts the remaining startup sequence.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use servisor::{Context, OpError, PhaseOp};
///
/// struct ConnectDb;
///
/// #[async_trait]
/// impl PhaseOp for ConnectDb {
///     fn name(&self) -> &str { "connect-db" }
///
///     async fn run(&self, cx: &Context) -> Result<(), OpError> {
///         let _host = cx.config()["sql"]["connection"]["host"].clone();
///         // open the pool...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait PhaseOp: Send + Sync + 'static {
    /// Returns a stable, human-readable operation name.
    fn name(&self) -> &str {
        "anonymous"
    }

    /// Executes the operation to completion.
    async fn run(&self, cx: &Context) -> Result<(), OpError>;
}

/// Shared reference to a phase operation.
pub type OpRef = Arc<dyn PhaseOp>;
