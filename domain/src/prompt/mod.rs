//! Prompt domain
//!
//! Compiles tool definitions into the system prompt that teaches the model
//! the invocation grammar.

mod template;

pub use template::ToolUsePromptTemplate;
