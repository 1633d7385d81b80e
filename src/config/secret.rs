//! # Lazily-materialized on-disk secret store.
//!
//! The secret store keeps the sensitive subset of the configuration outside
//! the primary config source. On the first run it projects the declared keys
//! out of the in-memory config, persists them next to a source-control ignore
//! marker, and returns the config unchanged; on every later run it loads the
//! persisted mapping and merges it over the config (the secret always wins
//! for the keys it defines).
//!
//! ## Flow
//! ```text
//! resolve(descriptor, config)
//!     │
//!     ├─ secret file exists ──► parse mapping ──► deep_merge(config, loaded)
//!     │                             └─ parse failure → ConfigError::SecretCorrupt
//!     │
//!     └─ first run ──► create_dir_all(directory)        (races tolerated)
//!                      append filename to .gitignore
//!                      project descriptor.keys out of config
//!                      fill in descriptor.additional defaults
//!                      persist as pretty JSON
//!                      return config unchanged (not re-read this run)
//! ```
//!
//! ## Rules
//! - Exactly one of {load, create} happens per resolution.
//! - Missing keys in the projection are skipped, not errored.
//! - Filesystem failures are fatal to startup ([`ConfigError::SecretIo`]).
//! - A corrupt existing secret is fatal: once present it is authoritative.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::merge::deep_merge;
use crate::error::ConfigError;

/// Identifies which configuration subset is sensitive and where it lives.
///
/// Parsed once per process lifetime from the merged configuration's `secret`
/// section (the directory comes from `directories.secret` unless the section
/// carries its own).
#[derive(Debug, Clone, Deserialize)]
pub struct SecretDescriptor {
    /// Directory holding the secret file; created on first run.
    pub directory: PathBuf,
    /// File name of the persisted secret inside `directory`.
    pub filename: String,
    /// Key paths (dot-separated) to project out of the config on first run.
    #[serde(default)]
    pub keys: Vec<String>,
    /// Defaults written alongside the projection — sections such as datastore
    /// credentials that are not present in the config at all.
    #[serde(default)]
    pub additional: Map<String, Value>,
}

impl SecretDescriptor {
    /// Builds a descriptor from a merged configuration, or `None` when the
    /// config carries no usable `secret` section (the stage is then skipped).
    pub fn from_config(config: &Value) -> Option<Self> {
        let mut section = config.get("secret")?.as_object()?.clone();
        if !section.contains_key("directory") {
            let dir = config
                .pointer("/directories/secret")
                .and_then(Value::as_str)?;
            section.insert("directory".to_string(), Value::String(dir.to_string()));
        }
        serde_json::from_value(Value::Object(section)).ok()
    }

    /// Full path of the secret file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Loads or materializes the secret and returns the effective configuration.
///
/// See the module docs for the exact load/create semantics.
pub async fn resolve(descriptor: &SecretDescriptor, config: &Value) -> Result<Value, ConfigError> {
    let path = descriptor.path();

    match fs::metadata(&path).await {
        Ok(_) => load(&path, config).await,
        Err(e) if e.kind() == ErrorKind::NotFound => create(descriptor, &path, config).await,
        Err(e) => Err(ConfigError::SecretIo { path, source: e }),
    }
}

async fn load(path: &PathBuf, config: &Value) -> Result<Value, ConfigError> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::SecretIo {
            path: path.clone(),
            source: e,
        })?;

    let loaded: Value = serde_json::from_str(&raw).map_err(|e| ConfigError::SecretCorrupt {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    if !loaded.is_object() {
        return Err(ConfigError::SecretCorrupt {
            path: path.clone(),
            reason: "secret root is not a mapping".to_string(),
        });
    }

    Ok(deep_merge(config, &loaded))
}

async fn create(
    descriptor: &SecretDescriptor,
    path: &PathBuf,
    config: &Value,
) -> Result<Value, ConfigError> {
    // create_dir_all treats an already-existing directory as success, which
    // also covers concurrent first-run races.
    fs::create_dir_all(&descriptor.directory)
        .await
        .map_err(|e| ConfigError::SecretIo {
            path: descriptor.directory.clone(),
            source: e,
        })?;

    append_ignore_marker(descriptor).await?;

    let mut doc = project(config, &descriptor.keys);
    for (key, val) in &descriptor.additional {
        doc.entry(key.clone()).or_insert_with(|| val.clone());
    }

    let text =
        serde_json::to_string_pretty(&Value::Object(doc)).map_err(|e| ConfigError::SecretIo {
            path: path.clone(),
            source: std::io::Error::new(ErrorKind::InvalidData, e),
        })?;
    fs::write(path, text)
        .await
        .map_err(|e| ConfigError::SecretIo {
            path: path.clone(),
            source: e,
        })?;

    // The freshly written secret is not re-read in the same run.
    Ok(config.clone())
}

/// Writes the ignore marker so the secret is excluded from source control.
async fn append_ignore_marker(descriptor: &SecretDescriptor) -> Result<(), ConfigError> {
    let marker = descriptor.directory.join(".gitignore");
    let mut file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&marker)
        .await
        .map_err(|e| ConfigError::SecretIo {
            path: marker.clone(),
            source: e,
        })?;
    file.write_all(format!("{}\n", descriptor.filename).as_bytes())
        .await
        .map_err(|e| ConfigError::SecretIo {
            path: marker,
            source: e,
        })
}

/// Key-path projection: extracts the subset of `config` reachable via the
/// dot-separated `keys`, rebuilding the nesting. Missing keys are skipped.
fn project(config: &Value, keys: &[String]) -> Map<String, Value> {
    let mut out = Map::new();
    for key_path in keys {
        let parts: Vec<&str> = key_path.split('.').collect();
        let mut cursor = config;
        let mut found = true;
        for part in &parts {
            match cursor.get(part) {
                Some(next) => cursor = next,
                None => {
                    found = false;
                    break;
                }
            }
        }
        if found {
            insert_path(&mut out, &parts, cursor.clone());
        }
    }
    out
}

fn insert_path(map: &mut Map<String, Value>, parts: &[&str], value: Value) {
    match parts {
        [] => {}
        [leaf] => {
            map.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let slot = map
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(inner) = slot {
                insert_path(inner, rest, value);
            }
        }
    }
}
