//! Application-level configuration.
//!
//! - [`ExecutionParams`]: model selection, token bound and timeouts for a cycle

pub mod execution_params;

pub use execution_params::ExecutionParams;
