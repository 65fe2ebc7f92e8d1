//! Use cases
//!
//! Application-level operations that orchestrate domain logic:
//! route a question, solve it with the matching handler, and wrap the
//! outcome in an [`AnswerEnvelope`](tutor_domain::AnswerEnvelope).

pub mod dispatch;
pub mod route_question;
pub mod solve_math;
pub mod solve_physics;
pub mod tool_loop;

pub(crate) mod tool_helpers;

#[cfg(test)]
pub(crate) mod test_support;

use crate::ports::llm_gateway::GatewayError;
use thiserror::Error;
use tutor_domain::ErrorCategory;

/// Errors that can occur while a handler answers a question.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("No response from model")]
    EmptyResponse,

    #[error("Model still requested tools after {0} tool turns")]
    ToolTurnLimit(usize),
}

impl HandlerError {
    /// Structured classification.
    ///
    /// `None` only for provider failures without a structured code; those
    /// are classified from [`HandlerError::gateway_error`].
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            HandlerError::Gateway(err) => err.category(),
            HandlerError::EmptyResponse | HandlerError::ToolTurnLimit(_) => {
                Some(ErrorCategory::HandlerFailure)
            }
        }
    }

    /// The provider failure, if this error came from the gateway.
    pub fn gateway_error(&self) -> Option<&GatewayError> {
        match self {
            HandlerError::Gateway(err) => Some(err),
            _ => None,
        }
    }
}
