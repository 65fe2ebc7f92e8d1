//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: LLM models the provider can serve
//! - [`question::Question`]: a validated, non-blank question
//! - [`subject::Subject`]: the routing label (Math or Physics)
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod question;
pub mod string;
pub mod subject;
