//! # Configuration resolution pipeline.
//!
//! This module turns built-in defaults, caller overrides, the process
//! environment, and an on-disk secret store into one effective configuration:
//! - [`deep_merge`] - pure recursive merge of nested mappings
//! - [`coerce`] - string-to-typed coercion for environment overrides
//! - [`apply_overrides`] / [`process_env`] - environment override layer
//! - [`SecretDescriptor`] + [`secret::resolve`] - lazily-materialized secrets
//! - [`resolver::resolve`] - the full pipeline, in fixed layer order
//! - [`built_in_defaults`] - the baseline mapping every resolution starts from
//!
//! ## Layer order
//! ```text
//! defaults ──deep_merge──► overrides ──env──► secret ──► effective config
//! ```

mod coerce;
mod defaults;
mod env;
mod merge;

pub mod resolver;
pub mod secret;

pub use coerce::coerce;
pub use defaults::built_in_defaults;
pub use env::{apply_overrides, process_env};
pub use merge::deep_merge;
pub use secret::SecretDescriptor;
