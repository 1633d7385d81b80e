//! # External service collaborator.
//!
//! This module provides the server-facing types:
//! - [`Service`] - trait the orchestrator drives during startup
//! - [`NullService`] - accepts every call and does nothing
//! - [`Fallback`] / [`FallbackFn`] - terminal fallback modes for unmatched
//!   requests

mod fallback;
mod service;

pub use fallback::{Fallback, FallbackFn};
pub use service::{NullService, Service};
