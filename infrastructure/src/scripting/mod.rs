//! Lua tool compiler (feature-gated: `scripting`)
//!
//! Provides [`LuaToolCompiler`], which implements `ToolCompilerPort` from the
//! application layer with one sandboxed Lua 5.4 VM (mlua) per tool.
//!
//! # Modules
//!
//! - `sandbox`: VM construction: restricted stdlib, memory and instruction limits
//! - `lua_compiler`: source evaluation, callable lookup and the tool handler

mod lua_compiler;
mod sandbox;

pub use lua_compiler::{LuaToolCompiler, LuaToolHandler};
pub use sandbox::SandboxLimits;
