//! Anthropic Messages API gateway.
//!
//! One non-streaming `POST {base_url}/v1/messages` per completion. The
//! system prompt goes in the top-level `system` field; stop sequences are
//! passed through and the API omits the matched sequence from the text.

use crate::config::FileAnthropicConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use toolcall_application::{CompletionRequest, GatewayError, LlmGateway};
use toolcall_domain::{CompletionResponse, StopReason};
use tracing::debug;

/// Anthropic-specific request structure
#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    stop_sequences: &'a [String],
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response structure for Anthropic API responses
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    stop_sequence: Option<String>,
    #[serde(default)]
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

/// Response structure for Anthropic error messages
#[derive(Debug, Deserialize)]
struct AnthropicErrorResponse {
    error: AnthropicErrorPayload,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorPayload {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

pub struct AnthropicGateway {
    client: Client,
    api_key: String,
    base_url: String,
    api_version: String,
}

impl AnthropicGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        let defaults = FileAnthropicConfig::default();
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: defaults.base_url,
            api_version: defaults.api_version,
        }
    }

    /// Build from the `[providers.anthropic]` section, resolving the key.
    pub fn from_config(config: &FileAnthropicConfig) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            GatewayError::AuthenticationError(format!(
                "no API key: set {} or providers.anthropic.api_key",
                config.api_key_env
            ))
        })?;
        Ok(Self::new(api_key)
            .with_base_url(&config.base_url)
            .with_api_version(&config.api_version))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

fn build_request(request: &CompletionRequest) -> AnthropicRequest<'_> {
    AnthropicRequest {
        model: request.model.as_str(),
        max_tokens: request.max_tokens,
        system: &request.system,
        messages: request
            .messages
            .iter()
            .map(|m| AnthropicMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect(),
        stop_sequences: &request.stop_sequences,
    }
}

fn into_completion(response: AnthropicResponse) -> CompletionResponse {
    let text = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect::<String>();

    if let Some(usage) = &response.usage {
        debug!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Anthropic usage"
        );
    }

    CompletionResponse {
        text,
        stop_reason: response.stop_reason.as_deref().map(StopReason::from_api),
        stop_sequence: response.stop_sequence,
    }
}

/// Map a non-success status and body to a gateway error.
fn error_for_status(status: StatusCode, body: &str) -> GatewayError {
    let message = match serde_json::from_str::<AnthropicErrorResponse>(body) {
        Ok(parsed) => format!("{}: {}", parsed.error.error_type, parsed.error.message),
        Err(_) => body.trim().to_string(),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::AuthenticationError(message)
        }
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(message),
        _ => GatewayError::RequestFailed(format!("{} ({})", message, status)),
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for AnthropicGateway {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        let body = build_request(request);
        debug!(
            url = %self.messages_url(),
            model = body.model,
            messages = body.messages.len(),
            "Sending Anthropic request"
        );

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(error_for_status(status, &text));
        }

        let parsed: AnthropicResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let completion = into_completion(parsed);
        debug!(
            stop_reason = ?completion.stop_reason,
            bytes = completion.text.len(),
            "Anthropic response received"
        );
        Ok(completion)
    }
}
