//! Application layer for toolcall
//!
//! This crate contains use cases, port definitions, the tool registry and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    conversation_logger::{
        ConversationEvent, ConversationLogger, CycleEventKind, NoConversationLogger,
    },
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    tool_compiler::{CompileError, ToolCompilerPort},
    tool_handler::{HandlerError, ToolHandler},
};
pub use registry::{RegisteredTool, RegistryError, ToolRegistry, ToolSet};
pub use use_cases::execute_tool::execute_tool;
pub use use_cases::register_tool::{
    ParameterSpec, RegisterToolError, RegisterToolInput, RegisterToolUseCase,
};
pub use use_cases::run_tool_cycle::{
    BoundTool, CycleOutcome, RunToolCycleError, RunToolCycleInput, RunToolCycleOutput,
    RunToolCycleUseCase, STOP_SEQUENCES,
};
