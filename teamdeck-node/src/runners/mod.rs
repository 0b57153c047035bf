//! Execution runners.
//!
//! - [`batch`]: sequential per-item loop with optional error isolation

pub mod batch;

pub use batch::{run_batch, ExecutionError};
