//! Completion response types.

use serde::{Deserialize, Serialize};

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// One of the requested stop sequences was generated.
    StopSequence,
    /// Hit the token limit; the text may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

impl StopReason {
    /// Map a provider stop reason string.
    pub fn from_api(reason: &str) -> Self {
        match reason {
            "end_turn" => StopReason::EndTurn,
            "stop_sequence" => StopReason::StopSequence,
            "max_tokens" => StopReason::MaxTokens,
            other => StopReason::Other(other.to_string()),
        }
    }
}

/// Text generated by one completion call.
///
/// The stop sequence itself is never part of `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
    /// Which stop sequence fired, when `stop_reason` is `StopSequence`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequence: Option<String>,
}

impl CompletionResponse {
    /// Wrap plain text as a naturally finished response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            stop_reason: Some(StopReason::EndTurn),
            stop_sequence: None,
        }
    }

    /// Response that halted on `sequence`.
    pub fn stopped_at(text: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            stop_reason: Some(StopReason::StopSequence),
            stop_sequence: Some(sequence.into()),
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.stop_reason, Some(StopReason::MaxTokens))
    }
}
