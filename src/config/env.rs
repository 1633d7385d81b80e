//! # Environment-variable override layer.
//!
//! Applies the environment on top of an already-merged configuration: every
//! configuration key whose **leaf name** also exists as an environment
//! variable (exact name or SCREAMING_CASE) is overridden with the coerced
//! value. Keys are matched at the top level and one level down inside
//! top-level mapping sections.
//!
//! ## Rules
//! - An environment variable only overrides a key that **already exists** in
//!   the configuration; it never introduces new keys.
//! - Values are coerced to the type of the existing value via
//!   [`coerce`](crate::coerce) (which never fails).
//! - Each matching key is applied independently; applications are idempotent,
//!   so ordering across keys is irrelevant.
//! - The function takes an explicit environment snapshot so the layer is
//!   testable without touching the real process environment.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::coerce::coerce;
use crate::config::merge::deep_merge;

/// Captures the current process environment as a snapshot.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Applies environment overrides onto `merged` and returns the result.
///
/// Scans the top-level keys of `merged`, plus the child keys of every
/// top-level mapping section; see the module docs for the matching rules.
pub fn apply_overrides(merged: &Value, env: &HashMap<String, String>) -> Value {
    let Some(root) = merged.as_object() else {
        return merged.clone();
    };

    let mut out = merged.clone();
    for (key, val) in root {
        if let Some(raw) = lookup(env, key) {
            let overlay = Value::Object(
                [(key.clone(), coerce(raw, val))].into_iter().collect(),
            );
            out = deep_merge(&out, &overlay);
        }

        // One level of recognized nesting: section.child addressed by its leaf name.
        if let Some(section) = val.as_object() {
            for (child, child_val) in section {
                if let Some(raw) = lookup(env, child) {
                    let overlay = Value::Object(
                        [(
                            key.clone(),
                            Value::Object(
                                [(child.clone(), coerce(raw, child_val))]
                                    .into_iter()
                                    .collect(),
                            ),
                        )]
                        .into_iter()
                        .collect(),
                    );
                    out = deep_merge(&out, &overlay);
                }
            }
        }
    }
    out
}

/// Exact match first, then the conventional SCREAMING_CASE variable name.
fn lookup<'e>(env: &'e HashMap<String, String>, key: &str) -> Option<&'e String> {
    env.get(key)
        .or_else(|| env.get(&key.to_ascii_uppercase()))
}
