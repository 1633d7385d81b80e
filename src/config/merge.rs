//! # Deep merge of nested configuration mappings.
//!
//! [`deep_merge`] recursively combines two configuration values: wherever both
//! sides hold a mapping for the same key it recurses, otherwise the override's
//! value replaces the base value wholesale. Every layer of the resolution
//! pipeline (caller overrides, environment overrides, the secret store) is
//! expressed as one call to this function, which is why it must stay pure.
//!
//! ## Rules
//! - Keys present only in `base` are retained untouched.
//! - Mapping vs mapping → recurse per key.
//! - Anything else (scalar, sequence, mapping vs scalar, ...) → override wins.
//! - Sequences are **never** merged element-wise; the override replaces the
//!   whole sequence.
//! - Inputs are not mutated; the merged value is a fresh allocation.
//!
//! ## Example
//! ```rust
//! use serde_json::json;
//! use servisor::deep_merge;
//!
//! let base = json!({ "listen": 8080, "logger": { "type": "on", "dir": "Logs" } });
//! let over = json!({ "logger": { "type": "off" } });
//!
//! let merged = deep_merge(&base, &over);
//! assert_eq!(merged, json!({ "listen": 8080, "logger": { "type": "off", "dir": "Logs" } }));
//! ```

use serde_json::Value;

/// Recursively merges `over` onto `base`; the override's leaves win.
///
/// Pure: neither input is mutated. See the module docs for the exact rules.
pub fn deep_merge(base: &Value, over: &Value) -> Value {
    match (base, over) {
        (Value::Object(b), Value::Object(o)) => {
            let mut out = b.clone();
            for (key, over_val) in o {
                match out.get(key) {
                    Some(base_val) if base_val.is_object() && over_val.is_object() => {
                        let merged = deep_merge(base_val, over_val);
                        out.insert(key.clone(), merged);
                    }
                    _ => {
                        out.insert(key.clone(), over_val.clone());
                    }
                }
            }
            Value::Object(out)
        }
        _ => over.clone(),
    }
}
