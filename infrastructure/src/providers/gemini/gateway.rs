//! Gemini LLM gateway
//!
//! Implements `LlmGateway` for the Gemini REST API. One HTTP client with a
//! per-request timeout is shared by every session.

use super::session::{Endpoint, GeminiSession};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tutor_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use tutor_domain::Model;

/// Settings for the Gemini gateway.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub max_output_tokens: u32,
}

impl GeminiConfig {
    /// Build from the `[provider]` section, reading the key from the environment.
    pub fn from_provider(provider: &FileProviderConfig) -> Self {
        Self {
            api_key: provider.resolve_api_key(),
            base_url: provider.base_url.clone(),
            timeout: Duration::from_secs(provider.timeout_secs),
            max_output_tokens: provider.max_output_tokens,
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

/// Gateway to Google's Gemini models.
///
/// Without an API key the gateway still builds; every session request then
/// fails with `GatewayError::Auth` so callers get a classified error.
pub struct GeminiGateway {
    endpoint: Option<Arc<Endpoint>>,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let Some(api_key) = config.api_key else {
            warn!("No Gemini API key configured; requests will fail with an auth error");
            return Ok(Self { endpoint: None });
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        info!(base_url = %config.base_url, "Gemini provider initialized");

        Ok(Self {
            endpoint: Some(Arc::new(Endpoint {
                client,
                base_url: config.base_url,
                api_key,
                max_output_tokens: config.max_output_tokens,
            })),
        })
    }

}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let endpoint = self
            .endpoint
            .clone()
            .ok_or_else(|| GatewayError::Auth("API key is not set".to_string()))?;

        Ok(Box::new(GeminiSession::new(
            endpoint,
            model.clone(),
            Some(system_prompt.to_string()),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_domain::ErrorCategory;

    fn config(api_key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.map(str::to_string),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(1),
            max_output_tokens: 128,
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_auth_error() {
        let gateway = GeminiGateway::new(config(None)).unwrap();

        let err = gateway
            .create_session_with_system_prompt(&Model::default(), "system")
            .await
            .err()
            .unwrap();
        assert_eq!(err.category(), Some(ErrorCategory::ProviderAuth));
    }

    #[tokio::test]
    async fn test_session_uses_requested_model() {
        let gateway = GeminiGateway::new(config(Some("k"))).unwrap();
        let session = gateway
            .create_session_with_system_prompt(&Model::Gemini25Pro, "system")
            .await
            .unwrap();
        assert_eq!(session.model(), &Model::Gemini25Pro);
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", config(Some("super-secret")));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_from_provider_section() {
        let provider = FileProviderConfig {
            api_key_env: "TUTORVERSE_TEST_UNSET_KEY_VAR".to_string(),
            timeout_secs: 5,
            ..Default::default()
        };
        let config = GeminiConfig::from_provider(&provider);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_output_tokens, 2048);
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
    }
}
