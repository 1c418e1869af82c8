//! Tool Handler port
//!
//! The executable side of a tool. The protocol engine treats a handler as
//! opaque: it receives coerced arguments and returns text.

use async_trait::async_trait;
use thiserror::Error;
use toolcall_domain::ToolArguments;

/// Failure raised by a handler. Always fatal to the cycle that called it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Resource limit exceeded: {0}")]
    LimitExceeded(String),
}

/// Executable binding for a tool definition
///
/// Domain-level "unsupported input" conditions should be returned as a
/// normal string result; `Err` is reserved for genuine failures.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool with every declared parameter present in `arguments`
    async fn call(&self, arguments: &ToolArguments) -> Result<String, HandlerError>;
}
