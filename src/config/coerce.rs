//! # Type coercion for environment-variable overrides.
//!
//! Environment variables are raw strings; the configuration they override is
//! typed. [`coerce`] converts a raw string into a value whose type matches an
//! existing reference value, so an override like `LISTEN=9090` lands as the
//! number `9090` and not the string `"9090"`.
//!
//! ## Rules
//! - Boolean reference → `"true"`/`"false"` (case-insensitive) parse; anything
//!   else falls back to the raw string.
//! - Numeric reference → integer parse first, then float; fallback to string.
//! - Mapping/sequence reference → parse raw as JSON; fallback to string.
//! - Any other reference → the raw string unchanged.
//!
//! Coercion **never fails**: a parse failure silently degrades to the original
//! string so that environment overrides can never crash startup.
//!
//! ## Example
//! ```rust
//! use serde_json::{json, Value};
//! use servisor::coerce;
//!
//! assert_eq!(coerce("9090", &json!(8080)), json!(9090));
//! assert_eq!(coerce("TRUE", &json!(false)), json!(true));
//! assert_eq!(coerce("not-a-number", &json!(8080)), json!("not-a-number"));
//! ```

use serde_json::Value;

/// Converts `raw` into a value typed like `reference`; falls back to the raw
/// string on any parse failure. Never raises.
pub fn coerce(raw: &str, reference: &Value) -> Value {
    match reference {
        Value::Bool(_) => match raw.to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        },
        Value::Number(n) => {
            if n.is_f64() {
                coerce_float(raw)
            } else {
                coerce_number(raw)
            }
        }
        Value::Object(_) | Value::Array(_) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => parsed,
            Err(_) => Value::String(raw.to_string()),
        },
        _ => Value::String(raw.to_string()),
    }
}

/// Integer parse first (most config numbers are ports/counts), then float.
fn coerce_number(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::from(i);
    }
    coerce_float(raw)
}

fn coerce_float(raw: &str) -> Value {
    match raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bool_reference() {
        assert_eq!(coerce("true", &json!(false)), json!(true));
        assert_eq!(coerce("FALSE", &json!(true)), json!(false));
        assert_eq!(coerce("True", &json!(false)), json!(true));
        // Not a recognized boolean: fall back to the raw string.
        assert_eq!(coerce("yes", &json!(false)), json!("yes"));
    }

    #[test]
    fn test_numeric_reference() {
        assert_eq!(coerce("9090", &json!(8080)), json!(9090));
        assert_eq!(coerce("-5", &json!(0)), json!(-5));
        assert_eq!(coerce("0.25", &json!(1.0)), json!(0.25));
        assert_eq!(coerce("nope", &json!(8080)), json!("nope"));
    }

    #[test]
    fn test_structured_reference() {
        assert_eq!(
            coerce(r#"{"host":"db","port":5432}"#, &json!({"host": "localhost"})),
            json!({"host": "db", "port": 5432})
        );
        assert_eq!(coerce("[1,2,3]", &json!([])), json!([1, 2, 3]));
        assert_eq!(coerce("{broken", &json!({})), json!("{broken"));
    }

    #[test]
    fn test_string_reference_passthrough() {
        assert_eq!(coerce("prod", &json!("dev")), json!("prod"));
        assert_eq!(coerce("9090", &json!("8080")), json!("9090"));
    }

    #[test]
    fn test_coercion_idempotent_for_bool_and_number() {
        // coerce(to_string(coerce(raw, ref)), ref) == coerce(raw, ref)
        for (raw, reference) in [
            ("true", json!(false)),
            ("FALSE", json!(true)),
            ("maybe", json!(true)),
            ("9090", json!(8080)),
            ("2.5", json!(1.0)),
            ("nope", json!(8080)),
        ] {
            let once = coerce(raw, &reference);
            let rendered = match &once {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            assert_eq!(coerce(&rendered, &reference), once, "raw={raw}");
        }
    }
}
