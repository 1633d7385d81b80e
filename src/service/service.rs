//! # External service collaborator seam.
//!
//! The core does not implement HTTP semantics. It calls into a [`Service`]
//! at fixed points of the lifecycle and expects the collaborator to own the
//! actual listener and its I/O loop:
//!
//! ```text
//! Initialization ──► register_health()
//! WrapUp         ──► serve_static(..) per configured mount
//!                    register_fallback(Fallback)
//!                    listen(port)          (info logged once on success)
//! ```

use std::path::Path;

use async_trait::async_trait;

use crate::error::OpError;
use crate::service::fallback::Fallback;

/// Contract for the externally-owned server.
#[async_trait]
pub trait Service: Send + Sync + 'static {
    /// Registers the baseline health-check endpoint.
    async fn register_health(&self) -> Result<(), OpError>;

    /// Registers a static mount rooted at `path`.
    async fn serve_static(&self, path: &Path) -> Result<(), OpError>;

    /// Installs the terminal fallback for unmatched requests.
    async fn register_fallback(&self, fallback: Fallback) -> Result<(), OpError>;

    /// Starts listening on `port`. Resolves once the listener is accepting.
    async fn listen(&self, port: u16) -> Result<(), OpError>;
}

/// Service that accepts every call and does nothing.
///
/// The default collaborator for headless deployments and tests; a real
/// deployment substitutes an adapter over its HTTP stack.
pub struct NullService;

#[async_trait]
impl Service for NullService {
    async fn register_health(&self) -> Result<(), OpError> {
        Ok(())
    }

    async fn serve_static(&self, _path: &Path) -> Result<(), OpError> {
        Ok(())
    }

    async fn register_fallback(&self, _fallback: Fallback) -> Result<(), OpError> {
        Ok(())
    }

    async fn listen(&self, _port: u16) -> Result<(), OpError> {
        Ok(())
    }
}
