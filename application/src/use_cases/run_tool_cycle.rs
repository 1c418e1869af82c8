//! Run Tool Cycle use case.
//!
//! One query, answered in two model calls:
//!
//! 1. **Request**: system prompt (tool descriptions + protocol) and the user
//!    turn, with generation halted at `</function_calls>`.
//! 2. **Parse/Execute**: every `<invoke>` block in the halted output is
//!    resolved against the cycle's [`ToolSet`], its parameters coerced, and
//!    the tool run, in order.
//! 3. **Inject**: the halted output, the swallowed closing tag and a
//!    `<function_results>` block become a partial assistant turn.
//! 4. **Complete**: the model continues from the partial turn; its output
//!    is appended to produce the final transcript.
//!
//! A first response that never opens `<function_calls>` is returned as a
//! direct answer and phases 2-4 are skipped. A call block whose `<invoke>`
//! was left unclosed is still executed, reading the parameters from
//! everything after the opening tag.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::tool_handler::HandlerError;
use crate::registry::{RegisteredTool, ToolSet};
use crate::use_cases::execute_tool::execute_tool;
use crate::use_cases::shared::{is_cancelled, race_cancellation, with_optional_timeout};
use crate::use_cases::tool_helpers::tool_args_preview;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use toolcall_domain::util::truncate_str;
use toolcall_domain::{
    CoercionError, CompletionResponse, InvocationRequest, ToolResult, ToolUsePromptTemplate,
    Transcript, coerce_invocation, parse_invocations, partial_assistant_message,
};
use tracing::{debug, info, warn};

/// Stop sequences registered on the request phase.
pub const STOP_SEQUENCES: [&str; 3] = ["\n\nHuman:", "\n\nAssistant:", "</function_calls>"];

/// Errors that abort a cycle. No partial transcript is returned.
#[derive(Error, Debug)]
pub enum RunToolCycleError {
    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("Unknown tool: '{0}'")]
    UnknownTool(String),

    #[error("Invalid parameter: {0}")]
    Coercion(#[from] CoercionError),

    #[error("Tool '{tool}' failed: {source}")]
    ToolFailed {
        tool: String,
        #[source]
        source: HandlerError,
    },

    #[error("No tools bound to the cycle")]
    NoTools,

    #[error("Cycle timed out after {0:?}")]
    Timeout(Duration),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Input for the [`RunToolCycleUseCase`].
#[derive(Debug, Clone)]
pub struct RunToolCycleInput {
    pub query: String,
    pub tools: ToolSet,
    pub execution: ExecutionParams,
}

impl RunToolCycleInput {
    pub fn new(query: impl Into<String>, tools: ToolSet, execution: ExecutionParams) -> Self {
        Self {
            query: query.into(),
            tools,
            execution,
        }
    }
}

/// How the cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Tools ran and the model continued from their results.
    ToolsInvoked { results: Vec<ToolResult> },
    /// The model answered without invoking a tool.
    DirectAnswer,
}

#[derive(Debug, Clone)]
pub struct RunToolCycleOutput {
    pub transcript: Transcript,
    pub outcome: CycleOutcome,
    /// The system prompt both requests were sent with
    pub system_prompt: String,
}

impl RunToolCycleOutput {
    /// Partial assistant message followed by the continuation.
    pub fn text(&self) -> &str {
        self.transcript.text()
    }
}

/// Use case for one tool-calling cycle.
#[derive(Clone)]
pub struct RunToolCycleUseCase {
    gateway: Arc<dyn LlmGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl RunToolCycleUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Run the cycle, bounded by the configured cycle timeout.
    pub async fn execute(
        &self,
        input: RunToolCycleInput,
    ) -> Result<RunToolCycleOutput, RunToolCycleError> {
        let limit = input.execution.cycle_timeout;
        match with_optional_timeout(limit, self.run(input)).await {
            Some(result) => result,
            None => {
                let limit = limit.unwrap_or_default();
                warn!(timeout = ?limit, "Cycle timed out");
                Err(RunToolCycleError::Timeout(limit))
            }
        }
    }

    async fn run(
        &self,
        input: RunToolCycleInput,
    ) -> Result<RunToolCycleOutput, RunToolCycleError> {
        if input.tools.is_empty() {
            return Err(RunToolCycleError::NoTools);
        }

        info!(
            "Starting tool cycle: {}",
            truncate_str(&input.query, 100)
        );

        let execution = &input.execution;
        let system_prompt = ToolUsePromptTemplate::system_prompt(input.tools.definitions());
        let mut transcript = Transcript::new(input.query.as_str());

        self.conversation_logger.log(ConversationEvent::cycle_start(
            &input.query,
            &execution.model.to_string(),
            input.tools.names(),
        ));

        // Request phase
        let request = CompletionRequest::new(
            execution.model.clone(),
            system_prompt.as_str(),
            transcript.replay_messages(),
            execution.max_tokens,
        )
        .with_stop_sequences(STOP_SEQUENCES);

        let first = self.complete(&request, execution.request_timeout).await?;
        let truncated = truncate_at_stop_sequence(&first.text);
        self.log_completion("request", &first, truncated);

        let invocations = parse_invocations(truncated);
        if invocations.is_empty() {
            info!("Model answered without invoking a tool");
            transcript.set_partial_assistant(truncated);
            self.log_cycle_end(&transcript, "direct_answer");
            return Ok(RunToolCycleOutput {
                transcript,
                outcome: CycleOutcome::DirectAnswer,
                system_prompt,
            });
        }

        // Parse/Execute phase
        let mut results = Vec::with_capacity(invocations.len());
        for invocation in &invocations {
            let tool = resolve_tool(&input.tools, invocation)?;
            let arguments = coerce_invocation(&tool.definition.parameters, invocation)?;

            self.conversation_logger
                .log(ConversationEvent::tool_call(tool.name(), &arguments));
            debug!(tool = tool.name(), args = %tool_args_preview(&arguments), "Invocation parsed");

            let result = race_cancellation(&self.cancellation_token, execute_tool(tool, &arguments))
                .await
                .ok_or(RunToolCycleError::Cancelled)?
                .map_err(|source| RunToolCycleError::ToolFailed {
                    tool: tool.name().to_string(),
                    source,
                })?;

            self.conversation_logger
                .log(ConversationEvent::tool_result(&result));
            results.push(result);
        }

        // Injection phase
        transcript.set_partial_assistant(partial_assistant_message(truncated, &results));
        let follow_up = CompletionRequest::new(
            execution.model.clone(),
            system_prompt.as_str(),
            transcript.replay_messages(),
            execution.max_tokens,
        );

        // Completion
        let second = self.complete(&follow_up, execution.request_timeout).await?;
        self.log_completion("continuation", &second, &second.text);
        if second.is_truncated() {
            warn!("Continuation hit the token limit; answer may be incomplete");
        }
        transcript.push_assistant_text(&second.text);

        info!(tools = results.len(), "Tool cycle completed");
        self.log_cycle_end(&transcript, "tools_invoked");

        Ok(RunToolCycleOutput {
            transcript,
            outcome: CycleOutcome::ToolsInvoked { results },
            system_prompt,
        })
    }

    /// One gateway call, bounded by the request timeout and the
    /// cancellation token.
    async fn complete(
        &self,
        request: &CompletionRequest,
        timeout: Option<Duration>,
    ) -> Result<CompletionResponse, RunToolCycleError> {
        if is_cancelled(&self.cancellation_token) {
            return Err(RunToolCycleError::Cancelled);
        }

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            stop_sequences = request.stop_sequences.len(),
            "Sending completion request"
        );

        let call = with_optional_timeout(timeout, self.gateway.complete(request));
        match race_cancellation(&self.cancellation_token, call).await {
            None => Err(RunToolCycleError::Cancelled),
            Some(None) => Err(RunToolCycleError::Timeout(timeout.unwrap_or_default())),
            Some(Some(result)) => Ok(result?),
        }
    }

    fn log_completion(&self, phase: &str, response: &CompletionResponse, text: &str) {
        self.conversation_logger
            .log(ConversationEvent::completion(phase, response, text));
    }

    fn log_cycle_end(&self, transcript: &Transcript, outcome: &str) {
        self.conversation_logger
            .log(ConversationEvent::cycle_end(outcome, transcript.text().len()));
    }
}

/// Look up the invoked tool; an empty name falls back to the only tool.
fn resolve_tool<'a>(
    tools: &'a ToolSet,
    invocation: &InvocationRequest,
) -> Result<&'a RegisteredTool, RunToolCycleError> {
    if invocation.tool_name.is_empty() {
        return tools
            .single()
            .ok_or_else(|| RunToolCycleError::UnknownTool(String::new()));
    }
    tools
        .get(&invocation.tool_name)
        .ok_or_else(|| RunToolCycleError::UnknownTool(invocation.tool_name.clone()))
}

/// Cut the text at the earliest stop sequence.
///
/// Gateways already exclude the sequence that fired; this also covers
/// providers that let one through.
fn truncate_at_stop_sequence(text: &str) -> &str {
    let end = STOP_SEQUENCES
        .iter()
        .filter_map(|s| text.find(s))
        .min()
        .unwrap_or(text.len());
    &text[..end]
}

/// A tool set bound to a cycle runner: one query in, transcript text out.
#[derive(Clone)]
pub struct BoundTool {
    use_case: RunToolCycleUseCase,
    tools: ToolSet,
    execution: ExecutionParams,
}

impl BoundTool {
    pub fn new(use_case: RunToolCycleUseCase, tools: ToolSet, execution: ExecutionParams) -> Self {
        Self {
            use_case,
            tools,
            execution,
        }
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Run a full cycle for `query` and return the final transcript text.
    pub async fn invoke(&self, query: &str) -> Result<String, RunToolCycleError> {
        let input = RunToolCycleInput::new(query, self.tools.clone(), self.execution.clone());
        let output = self.use_case.execute(input).await?;
        Ok(output.transcript.text().to_string())
    }
}
