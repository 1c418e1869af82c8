//! Port for the structured record of a tool cycle.
//!
//! Every cycle emits the same event sequence:
//! `cycle_start`, `completion` (request phase), then `tool_call` /
//! `tool_result` per invocation, `completion` (continuation) and `cycle_end`.
//! A direct answer skips straight from the first `completion` to `cycle_end`.
//!
//! `tracing` carries diagnostics; this port carries the exchange itself so
//! it can be replayed or inspected (see the JSONL adapter).

use serde_json::{Value, json};
use toolcall_domain::{CompletionResponse, ToolArguments, ToolResult};

/// Which step of the cycle an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEventKind {
    CycleStart,
    Completion,
    ToolCall,
    ToolResult,
    CycleEnd,
}

impl CycleEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleEventKind::CycleStart => "cycle_start",
            CycleEventKind::Completion => "completion",
            CycleEventKind::ToolCall => "tool_call",
            CycleEventKind::ToolResult => "tool_result",
            CycleEventKind::CycleEnd => "cycle_end",
        }
    }
}

impl std::fmt::Display for CycleEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cycle event and its JSON payload.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    pub kind: CycleEventKind,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: CycleEventKind, payload: Value) -> Self {
        Self { kind, payload }
    }

    pub fn cycle_start<'a>(
        query: &str,
        model: &str,
        tools: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::new(
            CycleEventKind::CycleStart,
            json!({
                "query": query,
                "model": model,
                "tools": tools.into_iter().collect::<Vec<_>>(),
            }),
        )
    }

    /// `text` is what the cycle kept of the response, after stop-sequence
    /// truncation.
    pub fn completion(phase: &str, response: &CompletionResponse, text: &str) -> Self {
        Self::new(
            CycleEventKind::Completion,
            json!({
                "phase": phase,
                "text": text,
                "stop_reason": response.stop_reason,
                "stop_sequence": response.stop_sequence,
            }),
        )
    }

    pub fn tool_call(tool: &str, arguments: &ToolArguments) -> Self {
        Self::new(
            CycleEventKind::ToolCall,
            json!({
                "tool": tool,
                "arguments": arguments,
            }),
        )
    }

    pub fn tool_result(result: &ToolResult) -> Self {
        Self::new(
            CycleEventKind::ToolResult,
            json!({
                "tool": result.tool_name,
                "result": result.result,
            }),
        )
    }

    pub fn cycle_end(outcome: &str, transcript_bytes: usize) -> Self {
        Self::new(
            CycleEventKind::CycleEnd,
            json!({
                "outcome": outcome,
                "bytes": transcript_bytes,
            }),
        )
    }

    pub fn event_type(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// Sink for cycle events.
///
/// `log` is synchronous and infallible; a failing sink never interrupts a
/// cycle.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
