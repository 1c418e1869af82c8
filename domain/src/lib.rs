//! Domain layer for toolcall
//!
//! This crate contains the text protocol that lets a model call tools:
//! tool definitions, the tag grammar, prompt compilation, invocation
//! parsing, parameter coercion and result injection.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool Definition
//!
//! A named capability with a description and typed parameters
//! (`integer` or `string`). Definitions are compiled into the system prompt.
//!
//! ## Orchestration Cycle
//!
//! One query answered in two model calls: the first halts on
//! `</function_calls>`, the engine runs the requested tool, and the second
//! continues from the output with the results injected.

pub mod core;
pub mod prompt;
pub mod protocol;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use core::{error::DomainError, model::Model};
pub use prompt::ToolUsePromptTemplate;
pub use protocol::{
    CoercionError, coerce_invocation, coerce_parameters, extract_between_tags,
    format_function_results, parse_invocations, partial_assistant_message,
};
pub use session::{
    entities::{Message, Role, Transcript},
    response::{CompletionResponse, StopReason},
};
pub use tool::{
    entities::{ParamType, ToolDefinition, ToolParameter},
    value_objects::{InvocationRequest, ParamValue, ToolArguments, ToolResult},
};
