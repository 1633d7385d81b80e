//! Built-in log sinks.
//!
//! [`TracingSink`] forwards each severity to the matching `tracing` macro and
//! is the default collaborator; [`NullSink`] drops everything and backs
//! `logger.type = "off"`.

use serde_json::Value;
use std::sync::Arc;

use crate::logger::sink::LogSink;

/// Default sink: forwards to the `tracing` macros.
///
/// Fatal has no `tracing` level of its own; it is emitted at `error` with a
/// `fatal` marker so filters can still separate the two.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn trace(&self, msg: &str) {
        tracing::trace!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn fatal(&self, msg: &str) {
        tracing::error!(fatal = true, "{msg}");
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}

/// Sink that drops every line.
pub struct NullSink;

impl LogSink for NullSink {
    fn trace(&self, _msg: &str) {}
    fn debug(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
    fn fatal(&self, _msg: &str) {}

    fn name(&self) -> &'static str {
        "null"
    }
}

/// Applies `logger.type` from the resolved configuration: `"off"` silences
/// the configured sink, anything else keeps it.
pub fn effective_sink(config: &Value, sink: Arc<dyn LogSink>) -> Arc<dyn LogSink> {
    match config.pointer("/logger/type").and_then(Value::as_str) {
        Some("off") => Arc::new(NullSink),
        _ => sink,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_logger_off_silences_the_sink() {
        let sink: Arc<dyn LogSink> = Arc::new(TracingSink);
        let cfg = json!({ "logger": { "type": "off" } });
        assert_eq!(effective_sink(&cfg, sink.clone()).name(), "null");

        let cfg = json!({ "logger": { "type": "on" } });
        assert_eq!(effective_sink(&cfg, sink.clone()).name(), "tracing");

        // No logger section keeps the configured sink.
        assert_eq!(effective_sink(&json!({}), sink).name(), "tracing");
    }
}
