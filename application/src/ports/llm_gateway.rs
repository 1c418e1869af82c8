//! LLM Gateway port
//!
//! Defines the interface for requesting completions from a model provider.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use toolcall_domain::{CompletionResponse, Message, Model};

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One completion request.
///
/// Generation halts as soon as the model emits any of `stop_sequences`;
/// the sequence itself is not included in the returned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: Model,
    pub system: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop_sequences: Vec<String>,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(
        model: Model,
        system: impl Into<String>,
        messages: Vec<Message>,
        max_tokens: u32,
    ) -> Self {
        Self {
            model,
            system: system.into(),
            messages,
            stop_sequences: Vec::new(),
            max_tokens,
        }
    }

    pub fn with_stop_sequences(
        mut self,
        sequences: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.stop_sequences = sequences.into_iter().map(Into::into).collect();
        self
    }
}

/// Gateway for model completions
///
/// This port defines how the application layer talks to a model provider.
/// Implementations (adapters) live in the infrastructure layer. Transport
/// level retries, if any, belong to the adapter.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one request and wait for the complete response
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, GatewayError>;
}
