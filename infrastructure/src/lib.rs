//! Infrastructure layer for toolcall
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
#[cfg(feature = "scripting")]
pub mod scripting;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::AnthropicGateway;
#[cfg(feature = "scripting")]
pub use scripting::{LuaToolCompiler, SandboxLimits};
pub use tools::{CalculatorTool, calculator_definition, register_builtin_tools};
