//! Built-in tool implementations
//!
//! Tools that ship with the binary and are registered at startup, before
//! any script tools from the config file.

pub mod calculator;

pub use calculator::{CALCULATOR, CalculatorTool, calculator_definition};

use std::sync::Arc;
use toolcall_application::{RegistryError, ToolRegistry};

/// Register every built-in tool.
pub fn register_builtin_tools(registry: &ToolRegistry) -> Result<(), RegistryError> {
    registry.register(calculator_definition(), Arc::new(CalculatorTool))
}
