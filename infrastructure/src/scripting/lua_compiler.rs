//! Lua implementation of the tool compiler port.
//!
//! The source is executed once in a fresh [`Sandbox`]; it must leave a
//! global function named after the tool. Each call passes the declared
//! parameters positionally, in declaration order, and converts the first
//! return value to text.

use super::sandbox::{Sandbox, SandboxLimits};
use async_trait::async_trait;
use mlua::prelude::*;
use mlua::MultiValue;
use std::sync::{Arc, Mutex, PoisonError};
use toolcall_application::{CompileError, HandlerError, ToolCompilerPort, ToolHandler};
use toolcall_domain::util::format_float;
use toolcall_domain::{ParamType, ParamValue, ToolArguments, ToolDefinition, ToolParameter};
use tracing::debug;

/// Compiles Lua source into sandboxed tool handlers, one VM per tool.
#[derive(Debug, Clone, Default)]
pub struct LuaToolCompiler {
    limits: SandboxLimits,
}

impl LuaToolCompiler {
    pub fn new(limits: SandboxLimits) -> Self {
        Self { limits }
    }
}

impl ToolCompilerPort for LuaToolCompiler {
    fn language(&self) -> &str {
        "lua"
    }

    fn compile(
        &self,
        definition: &ToolDefinition,
        source: &str,
    ) -> Result<Arc<dyn ToolHandler>, CompileError> {
        let sandbox =
            Sandbox::new(self.limits).map_err(|e| CompileError::Sandbox(e.to_string()))?;

        sandbox.reset_budget();
        sandbox
            .lua
            .load(source)
            .set_name(format!("={}", definition.name))
            .exec()
            .map_err(|e| CompileError::Compile(e.to_string()))?;

        let callable: LuaValue = sandbox
            .lua
            .globals()
            .get(definition.name.as_str())
            .map_err(|e| CompileError::Compile(e.to_string()))?;
        if !matches!(callable, LuaValue::Function(_)) {
            return Err(CompileError::UnresolvedCallable(definition.name.clone()));
        }

        debug!(tool = %definition.name, "Compiled Lua tool");
        Ok(Arc::new(LuaToolHandler {
            script: Arc::new(LuaScript {
                name: definition.name.clone(),
                parameters: definition.parameters.clone(),
                sandbox: Mutex::new(sandbox),
            }),
        }))
    }
}

/// A compiled Lua tool.
///
/// Calls run on the blocking pool and are serialized on the VM lock, so a
/// long script never stalls the async workers and a caller that stops
/// waiting (timeout, cancellation) gets control back immediately. The
/// script itself still runs until it returns or exhausts its budget.
pub struct LuaToolHandler {
    script: Arc<LuaScript>,
}

struct LuaScript {
    name: String,
    parameters: Vec<ToolParameter>,
    sandbox: Mutex<Sandbox>,
}

impl LuaScript {
    fn run(&self, arguments: &ToolArguments) -> Result<String, HandlerError> {
        let sandbox = self.sandbox.lock().unwrap_or_else(PoisonError::into_inner);
        let lua = &sandbox.lua;

        let function: LuaFunction = lua
            .globals()
            .get(self.name.as_str())
            .map_err(|e| HandlerError::ExecutionFailed(e.to_string()))?;

        let args = self
            .parameters
            .iter()
            .map(|param| to_lua(lua, param, arguments.get(&param.name)))
            .collect::<LuaResult<Vec<_>>>()
            .map_err(|e| HandlerError::InvalidArgument(e.to_string()))?;

        sandbox.reset_budget();
        let value = function
            .call::<LuaValue>(MultiValue::from_vec(args))
            .map_err(|e| {
                if matches!(e, LuaError::MemoryError(_)) || sandbox.budget_exhausted() {
                    HandlerError::LimitExceeded(e.to_string())
                } else {
                    HandlerError::ExecutionFailed(e.to_string())
                }
            })?;

        to_text(value)
    }
}

#[async_trait]
impl ToolHandler for LuaToolHandler {
    async fn call(&self, arguments: &ToolArguments) -> Result<String, HandlerError> {
        let script = Arc::clone(&self.script);
        let arguments = arguments.clone();
        tokio::task::spawn_blocking(move || script.run(&arguments))
            .await
            .map_err(|e| HandlerError::ExecutionFailed(format!("Lua task failed: {}", e)))?
    }
}

/// Argument for one declared parameter; absent values take the type's default.
fn to_lua(lua: &Lua, param: &ToolParameter, value: Option<&ParamValue>) -> LuaResult<LuaValue> {
    match (param.param_type, value) {
        (_, Some(ParamValue::Integer(n))) => Ok(LuaValue::Integer(*n)),
        (_, Some(ParamValue::String(s))) => lua.create_string(s).map(LuaValue::String),
        (ParamType::Integer, None) => Ok(LuaValue::Integer(0)),
        (ParamType::String, None) => lua.create_string("").map(LuaValue::String),
    }
}

fn to_text(value: LuaValue) -> Result<String, HandlerError> {
    match value {
        LuaValue::Nil => Ok("nil".to_string()),
        LuaValue::Boolean(b) => Ok(b.to_string()),
        LuaValue::Integer(n) => Ok(n.to_string()),
        LuaValue::Number(f) => Ok(format_float(f)),
        LuaValue::String(s) => Ok(s.to_string_lossy().to_string()),
        other => Err(HandlerError::ExecutionFailed(format!(
            "tool returned a {} value; expected a string, number, boolean or nil",
            other.type_name()
        ))),
    }
}
