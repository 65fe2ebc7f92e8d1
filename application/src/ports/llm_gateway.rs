//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers. Every call is
//! a fallible async operation; nothing here retries or times out on its own.
//! Those are the adapter's concern.

use async_trait::async_trait;
use tutor_domain::session::structured::extract_json_object;
use tutor_domain::{ErrorCategory, LlmResponse, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations.
///
/// The provider-specific variants carry the structured classification the
/// dispatch boundary prefers over keyword matching.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Quota exceeded: {0}")]
    Quota(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Structured classification, when the provider told us what went wrong.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            GatewayError::Auth(_) => Some(ErrorCategory::ProviderAuth),
            GatewayError::Quota(_) => Some(ErrorCategory::ProviderQuota),
            GatewayError::Timeout => Some(ErrorCategory::ProviderTimeout),
            GatewayError::ModelNotAvailable(_) => Some(ErrorCategory::ProviderModelUnavailable),
            _ => None,
        }
    }
}

/// A tool result sent back to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResultMessage {
    /// Provider-assigned ID of the tool call this answers.
    pub tool_use_id: String,
    pub tool_name: String,
    pub output: String,
    pub is_error: bool,
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session for `model` with a system prompt
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active LLM session.
///
/// A session keeps the conversation history so tool results can be sent
/// back after a tool-use response.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a message and get a text response
    async fn send(&self, content: &str) -> Result<String, GatewayError>;

    /// Send a message and get a JSON object conforming to `schema`.
    ///
    /// Default implementation sends the message as text and extracts the
    /// first JSON object from the reply. Adapters with native structured
    /// output should override this.
    async fn send_structured(
        &self,
        content: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        let _ = schema;
        let text = self.send(content).await?;
        extract_json_object(&text).ok_or_else(|| {
            GatewayError::InvalidResponse("model reply contained no JSON object".to_string())
        })
    }

    /// Send a message with tool declarations
    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError>;

    /// Send tool results for the previous tool-use response
    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError>;
}
