//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: model identifiers accepted by the completion API
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
