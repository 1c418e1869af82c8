//! The text protocol spoken between the model and the engine.
//!
//! ```text
//!   model output ──▶ invocation::parse_invocations ──▶ coercion::coerce_parameters
//!                                                            │
//!   partial assistant turn ◀── injection::partial_assistant_message ◀── tool output
//! ```
//!
//! All readers are built on [`tags::extract_between_tags`]. Tag names and
//! layout are part of the wire format and must not change.

pub mod coercion;
pub mod injection;
pub mod invocation;
pub mod tags;

pub use coercion::{CoercionError, coerce_invocation, coerce_parameters};
pub use injection::{format_function_results, partial_assistant_message};
pub use invocation::parse_invocations;
pub use tags::extract_between_tags;
