//! Tool Compiler port
//!
//! Turns operator-supplied source text into a [`ToolHandler`]. This is the
//! trust boundary for dynamically registered tools: implementations must
//! evaluate the source in an isolated, capability-restricted environment.

use super::tool_handler::ToolHandler;
use std::sync::Arc;
use thiserror::Error;
use toolcall_domain::ToolDefinition;

/// Errors raised while building a handler from source text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Failed to set up sandbox: {0}")]
    Sandbox(String),

    #[error("Failed to compile tool source: {0}")]
    Compile(String),

    #[error("Source does not define a callable named '{0}'")]
    UnresolvedCallable(String),
}

/// Port for compiling tool source into an executable handler
pub trait ToolCompilerPort: Send + Sync {
    /// Human-readable name of the source language (for logs and help text)
    fn language(&self) -> &str;

    /// Evaluate `source` and resolve the callable named after `definition`.
    fn compile(
        &self,
        definition: &ToolDefinition,
        source: &str,
    ) -> Result<Arc<dyn ToolHandler>, CompileError>;
}
