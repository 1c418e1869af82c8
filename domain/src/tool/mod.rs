//! Tool domain module
//!
//! Defines what a tool *is* to the protocol engine: a [`ToolDefinition`]
//! (name, description, typed parameters) and the values that flow through
//! one invocation.
//!
//! ```text
//! ┌────────────────┐   ┌───────────────────┐   ┌───────────────┐   ┌────────────┐
//! │ ToolDefinition │──▶│ InvocationRequest │──▶│ ToolArguments │──▶│ ToolResult │
//! │ (declared)     │   │ (model text)      │   │ (coerced)     │   │ (output)   │
//! └────────────────┘   └───────────────────┘   └───────────────┘   └────────────┘
//! ```
//!
//! Parameter types form a closed set ([`ParamType`]); the executable
//! binding for a definition is an application-layer concern.

pub mod entities;
pub mod value_objects;

pub use entities::{ParamType, ToolDefinition, ToolParameter};
pub use value_objects::{InvocationRequest, ParamValue, ToolArguments, ToolResult};
