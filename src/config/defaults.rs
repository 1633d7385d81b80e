//! Built-in configuration defaults.
//!
//! The baseline every resolution starts from. Caller overrides, environment
//! variables, and the secret store are all layered on top of this mapping, so
//! a service constructed with an empty override set is still fully runnable.

use serde_json::{json, Value};

/// Returns the built-in default configuration.
///
/// Notable keys:
/// - `master` — enables schedule activation; worker replicas set it to false.
/// - `dev` — environment discriminator (`"dev"` / `"prod"` / ...).
/// - `listen` — port handed to the service collaborator (`PORT`-style
///   environment overrides land here through the normal env layer).
/// - `handle404` — fallback mode for unmatched requests.
/// - `secret` — descriptor for the on-disk secret store, with disabled
///   datastore stanzas in `additional`.
pub fn built_in_defaults() -> Value {
    json!({
        "master": true,
        "dev": "dev",
        "listen": 8080,
        "serve_static": {
            "html": [],
            "file": [],
        },
        "logger": {
            "type": "on",
        },
        "handle404": {
            "type": "message",
            "value": "404 not found",
        },
        "directories": {
            "secret": "Personal",
        },
        "secret": {
            "filename": "secret.json",
            "keys": ["master", "listen"],
            "additional": {
                "redis": {
                    "enable": false,
                    "port": 6379,
                    "host": "localhost",
                    "password": "",
                },
                "sql": {
                    "enable": false,
                    "client": "mysql",
                    "connection": {
                        "host": "localhost",
                        "user": "",
                        "password": "",
                        "database": "",
                    },
                },
            },
        },
    })
}
