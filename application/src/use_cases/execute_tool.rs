//! Tool execution.
//!
//! Calls a registered tool's handler with coerced arguments and wraps the
//! output as a [`ToolResult`]. Handler errors pass through untouched: there
//! is no retry and no fallback.

use crate::ports::tool_handler::HandlerError;
use crate::registry::RegisteredTool;
use crate::use_cases::tool_helpers::tool_args_preview;
use std::time::Instant;
use toolcall_domain::util::truncate_str;
use toolcall_domain::{ToolArguments, ToolResult};
use tracing::{debug, info, warn};

/// Run `tool` with `arguments`.
pub async fn execute_tool(
    tool: &RegisteredTool,
    arguments: &ToolArguments,
) -> Result<ToolResult, HandlerError> {
    debug!(
        tool = tool.name(),
        args = %tool_args_preview(arguments),
        "Executing tool"
    );
    let start = Instant::now();

    let output = match tool.handler.call(arguments).await {
        Ok(output) => output,
        Err(e) => {
            warn!(tool = tool.name(), error = %e, "Tool failed");
            return Err(e);
        }
    };

    info!(
        tool = tool.name(),
        duration_ms = start.elapsed().as_millis() as u64,
        bytes = output.len(),
        "Tool finished: {}",
        truncate_str(&output, 100)
    );
    Ok(ToolResult::new(tool.name(), output))
}
