//! # Configuration resolution pipeline.
//!
//! Produces the effective configuration a service runs with, in a fixed
//! order of layers:
//!
//! ```text
//! built-in defaults
//!     │ deep_merge
//! caller overrides
//!     │ apply_overrides (env snapshot, coerced per existing type)
//! environment
//!     │ secret::resolve (load-or-materialize, file wins)
//! secret store
//!     │
//! effective configuration
//! ```
//!
//! ## Rules
//! - Both roots must be mappings; anything else is a
//!   [`ConfigError::MergeConflict`].
//! - Environment coercion never fails (silent string fallback).
//! - The secret stage is skipped entirely when the merged configuration
//!   carries no usable `secret` section.
//! - Resolution runs once per orchestrator; the result is treated as an
//!   immutable snapshot from the first phase on.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::env::apply_overrides;
use crate::config::merge::deep_merge;
use crate::config::secret::{self, SecretDescriptor};
use crate::error::ConfigError;

/// Resolves the effective configuration from `defaults`, `overrides`, and an
/// environment snapshot. Asynchronous because the secret stage may touch the
/// filesystem.
pub async fn resolve(
    defaults: &Value,
    overrides: &Value,
    env: &HashMap<String, String>,
) -> Result<Value, ConfigError> {
    ensure_mapping(defaults, "defaults")?;
    ensure_mapping(overrides, "overrides")?;

    let merged = deep_merge(defaults, overrides);
    let merged = apply_overrides(&merged, env);

    match SecretDescriptor::from_config(&merged) {
        Some(descriptor) => secret::resolve(&descriptor, &merged).await,
        None => Ok(merged),
    }
}

fn ensure_mapping(layer: &Value, which: &str) -> Result<(), ConfigError> {
    if layer.is_object() {
        return Ok(());
    }
    Err(ConfigError::MergeConflict {
        context: format!("{which} root is not a mapping"),
    })
}
