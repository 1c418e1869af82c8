//! Conversation entities

use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Conversation state of one orchestration cycle.
///
/// Built fresh for every query and owned by that cycle alone. `turns` is
/// the history sent to the model; `partial_assistant` is the assistant text
/// accumulated so far (model output plus injected results).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Message>,
    partial_assistant: String,
}

impl Transcript {
    /// Start a transcript with the user's query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            turns: vec![Message::user(query)],
            partial_assistant: String::new(),
        }
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn partial_assistant(&self) -> &str {
        &self.partial_assistant
    }

    /// Replace the partial assistant turn (after result injection).
    pub fn set_partial_assistant(&mut self, text: impl Into<String>) {
        self.partial_assistant = text.into();
    }

    /// Append model output to the partial assistant turn.
    pub fn push_assistant_text(&mut self, text: &str) {
        self.partial_assistant.push_str(text);
    }

    /// History for a follow-up request: the user turn plus the partial
    /// assistant turn, which the model continues.
    pub fn replay_messages(&self) -> Vec<Message> {
        let mut messages = self.turns.clone();
        if !self.partial_assistant.is_empty() {
            messages.push(Message::assistant(self.partial_assistant.clone()));
        }
        messages
    }

    /// The final text handed back to the caller.
    pub fn text(&self) -> &str {
        &self.partial_assistant
    }
}
