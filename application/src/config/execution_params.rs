//! Execution parameters: orchestration cycle control.
//!
//! [`ExecutionParams`] groups the static parameters that control one
//! [`RunToolCycleUseCase`](crate::use_cases::run_tool_cycle::RunToolCycleUseCase)
//! run. These are application-layer concerns, not protocol rules.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use toolcall_domain::Model;

/// Cycle control parameters.
///
/// | Field | Applies to |
/// |-------|------------|
/// | `model`, `max_tokens` | both completion requests |
/// | `request_timeout` | each completion request separately |
/// | `cycle_timeout` | the whole cycle, tool execution included |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Model used for both requests of a cycle.
    pub model: Model,
    /// Upper bound on generated tokens per request.
    pub max_tokens: u32,
    /// Timeout for a single completion request.
    pub request_timeout: Option<Duration>,
    /// Timeout for the whole cycle.
    pub cycle_timeout: Option<Duration>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            max_tokens: 1024,
            request_timeout: Some(Duration::from_secs(120)),
            cycle_timeout: Some(Duration::from_secs(300)),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_cycle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.cycle_timeout = timeout;
        self
    }
}
