//! Terminal fallback behavior for unmatched requests.
//!
//! Exactly one of three mutually exclusive modes is active at a time,
//! selected by the `handle404` configuration section: a static message, a
//! file response, or a caller-supplied function.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

/// Caller-supplied fallback function: request path in, response body out.
pub type FallbackFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The selected fallback mode.
#[derive(Clone)]
pub enum Fallback {
    /// Respond with a fixed message.
    Message(String),
    /// Respond with the contents of a file.
    File(PathBuf),
    /// Delegate to a caller-supplied function.
    Handler(FallbackFn),
}

impl Fallback {
    /// Selects the fallback mode from the `handle404` section.
    ///
    /// `custom` is the function registered on the builder; it is only used
    /// when the config asks for `type = "function"`. Asking for a function
    /// without registering one degrades to the message mode and returns a
    /// warning for the caller to report.
    pub fn from_config(config: &Value, custom: Option<FallbackFn>) -> (Self, Option<&'static str>) {
        let section = config.get("handle404");
        let kind = section
            .and_then(|s| s.get("type"))
            .and_then(Value::as_str)
            .unwrap_or("message");
        let value = section
            .and_then(|s| s.get("value"))
            .and_then(Value::as_str)
            .unwrap_or("404 not found");

        match kind {
            "filePath" => (Fallback::File(PathBuf::from(value)), None),
            "function" => match custom {
                Some(f) => (Fallback::Handler(f), None),
                None => (
                    Fallback::Message(value.to_string()),
                    Some("handle404.type is \"function\" but no fallback handler was registered; using message mode"),
                ),
            },
            _ => (Fallback::Message(value.to_string()), None),
        }
    }

    /// Mode name for diagnostics.
    pub fn mode(&self) -> &'static str {
        match self {
            Fallback::Message(_) => "message",
            Fallback::File(_) => "file",
            Fallback::Handler(_) => "function",
        }
    }
}

impl std::fmt::Debug for Fallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fallback::Message(m) => f.debug_tuple("Message").field(m).finish(),
            Fallback::File(p) => f.debug_tuple("File").field(p).finish(),
            Fallback::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_mode_is_the_default() {
        let (fb, warn) = Fallback::from_config(&json!({}), None);
        assert_eq!(fb.mode(), "message");
        assert!(warn.is_none());

        let cfg = json!({ "handle404": { "type": "message", "value": "gone" } });
        let (fb, _) = Fallback::from_config(&cfg, None);
        match fb {
            Fallback::Message(m) => assert_eq!(m, "gone"),
            other => panic!("expected message mode, got {other:?}"),
        }
    }

    #[test]
    fn test_file_mode() {
        let cfg = json!({ "handle404": { "type": "filePath", "value": "static/404.html" } });
        let (fb, warn) = Fallback::from_config(&cfg, None);
        assert_eq!(fb.mode(), "file");
        assert!(warn.is_none());
    }

    #[test]
    fn test_function_mode_requires_a_registered_handler() {
        let cfg = json!({ "handle404": { "type": "function" } });

        let custom: FallbackFn = Arc::new(|path| format!("no route for {path}"));
        let (fb, warn) = Fallback::from_config(&cfg, Some(custom));
        assert_eq!(fb.mode(), "function");
        assert!(warn.is_none());
        match fb {
            Fallback::Handler(f) => assert_eq!(f("/x"), "no route for /x"),
            other => panic!("expected function mode, got {other:?}"),
        }

        // Config asks for a function but none was registered: degrade + warn.
        let (fb, warn) = Fallback::from_config(&cfg, None);
        assert_eq!(fb.mode(), "message");
        assert!(warn.is_some());
    }
}
