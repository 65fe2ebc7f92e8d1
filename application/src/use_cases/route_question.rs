//! Route Question use case.
//!
//! Classifies a question into exactly one [`Subject`] with a single
//! structured-output LLM call.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use tutor_domain::session::structured::string_field;
use tutor_domain::{ErrorCategory, Model, Question, Subject, TutorPrompt, truncate};

/// Errors that can occur while routing a question.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Router returned an unknown subject: {0}")]
    InvalidRoute(String),

    #[error("Malformed router output: {0}")]
    MalformedOutput(String),
}

impl RouteError {
    /// Structured classification.
    ///
    /// Output the model produced is always a routing failure, whatever its
    /// wording. `None` only for provider failures without a structured code.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            RouteError::Gateway(err) => err.category(),
            RouteError::InvalidRoute(_) | RouteError::MalformedOutput(_) => {
                Some(ErrorCategory::RoutingFailure)
            }
        }
    }

    /// The provider failure, if this error came from the gateway.
    pub fn gateway_error(&self) -> Option<&GatewayError> {
        match self {
            RouteError::Gateway(err) => Some(err),
            _ => None,
        }
    }
}

/// Classifies a question into a subject.
#[async_trait]
pub trait QuestionRouter: Send + Sync {
    async fn route(&self, question: &Question) -> Result<Subject, RouteError>;
}

/// JSON Schema for the router's structured output: `{"route": "Math" | "Physics"}`.
pub fn route_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "route": {
                "type": "string",
                "enum": Subject::schema_values(),
            }
        },
        "required": ["route"]
    })
}

/// Router backed by an LLM classification call.
pub struct LlmQuestionRouter {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
}

impl LlmQuestionRouter {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model) -> Self {
        Self { gateway, model }
    }
}

#[async_trait]
impl QuestionRouter for LlmQuestionRouter {
    async fn route(&self, question: &Question) -> Result<Subject, RouteError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, TutorPrompt::router_system())
            .await?;

        let output = session
            .send_structured(&TutorPrompt::router_query(question.content()), &route_schema())
            .await?;
        debug!("Router output: {}", truncate(&output.to_string(), 200));

        let route = string_field(&output, "route")
            .ok_or_else(|| RouteError::MalformedOutput(output.to_string()))?;

        route
            .parse::<Subject>()
            .map_err(|_| RouteError::InvalidRoute(route.to_string()))
    }
}
