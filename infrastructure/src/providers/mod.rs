//! Model provider adapters implementing the
//! [`LlmGateway`](toolcall_application::LlmGateway) port.

pub mod anthropic;

pub use anthropic::AnthropicGateway;
