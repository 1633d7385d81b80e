//! # Logger collaborator seam.
//!
//! This module provides the logging-related types:
//! - [`LogSink`] - trait with six severity-leveled sinks
//! - [`TracingSink`] - default implementation forwarding to `tracing`
//! - [`NullSink`] - drops everything (`logger.type = "off"`)
//! - [`effective_sink`] - applies the resolved config's logger switch

mod sink;
mod sinks;

pub use sink::LogSink;
pub use sinks::{effective_sink, NullSink, TracingSink};
