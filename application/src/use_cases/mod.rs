//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod execute_tool;
pub mod register_tool;
pub mod run_tool_cycle;
pub(crate) mod shared;
pub(crate) mod tool_helpers;
