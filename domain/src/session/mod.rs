//! Conversation domain.
//!
//! - [`entities::Message`]: a single turn sent to the model
//! - [`entities::Transcript`]: everything one cycle exchanged with the model
//! - [`response::CompletionResponse`]: text returned by one completion call

pub mod entities;
pub mod response;
