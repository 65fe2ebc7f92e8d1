//! Domain layer for TutorVerse
//!
//! This crate contains the core types and pure logic. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Question**: a non-blank user submission
//! - **Subject**: Math or Physics, the label a question is routed to
//! - **AnswerEnvelope**: the uniform tagged result of one dispatch
//! - **ErrorCategory**: the user-safe failure taxonomy
//! - **ConstantTable**: read-only physical constants
//! - **calculator**: closed-grammar arithmetic evaluation

pub mod calculator;
pub mod constants;
pub mod core;
pub mod envelope;
pub mod prompt;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use calculator::{EvalError, evaluate, try_evaluate};
pub use constants::{ConstantEntry, ConstantError, ConstantTable};
pub use core::{
    error::DomainError, model::Model, question::Question, string::truncate, subject::Subject,
};
pub use envelope::{AnswerEnvelope, EnvelopeKind, WELCOME_MESSAGE, category::ErrorCategory};
pub use prompt::TutorPrompt;
pub use session::response::{ContentBlock, LlmResponse};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
