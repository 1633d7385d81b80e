//! # Phase operation abstractions.
//!
//! This module provides the operation-related types:
//! - [`PhaseOp`] - trait for implementing async phase operations
//! - [`OpFn`] - function-based operation implementation
//! - [`OpRef`] - shared reference to an operation (`Arc<dyn PhaseOp>`)

mod op;
mod op_fn;

pub use op::{OpRef, PhaseOp};
pub use op_fn::OpFn;
