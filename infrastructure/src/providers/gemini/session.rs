//! Gemini LLM session implementation
//!
//! Wraps the `generateContent` REST endpoint to implement the `LlmSession`
//! trait. The endpoint is stateless, so the session keeps the conversation
//! history and resends it on every call.

use super::types::{self, Content, GenerateContentRequest, GenerationConfig, Part, Tool};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use tutor_application::ports::llm_gateway::{GatewayError, LlmSession, ToolResultMessage};
use tutor_domain::session::structured::extract_json_object;
use tutor_domain::{LlmResponse, Model};

/// Connection settings shared by every session of one gateway.
pub(super) struct Endpoint {
    pub client: reqwest::Client,
    pub base_url: String,
    pub api_key: String,
    pub max_output_tokens: u32,
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("max_output_tokens", &self.max_output_tokens)
            .finish_non_exhaustive()
    }
}

impl Endpoint {
    fn generate_url(&self, model: &Model) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

pub struct GeminiSession {
    endpoint: Arc<Endpoint>,
    model: Model,
    system_prompt: Option<String>,
    /// Conversation history
    contents: Mutex<Vec<Content>>,
    /// Function declarations (set when send_with_tools is first called)
    tools: Mutex<Option<Vec<Tool>>>,
}

impl GeminiSession {
    pub(super) fn new(endpoint: Arc<Endpoint>, model: Model, system_prompt: Option<String>) -> Self {
        Self {
            endpoint,
            model,
            system_prompt: system_prompt.filter(|p| !p.is_empty()),
            contents: Mutex::new(Vec::new()),
            tools: Mutex::new(None),
        }
    }

    /// POST one generateContent request.
    async fn generate(
        &self,
        contents: &[Content],
        generation_config: GenerationConfig,
        with_tools: bool,
    ) -> Result<(LlmResponse, Option<Content>), GatewayError> {
        let tools = if with_tools {
            self.tools.lock().await.clone()
        } else {
            None
        };

        let request = GenerateContentRequest {
            contents: contents.to_vec(),
            system_instruction: self.system_prompt.as_deref().map(Content::system),
            tools,
            generation_config: Some(generation_config),
        };

        debug!(
            model = %self.model,
            contents = contents.len(),
            "Calling Gemini generateContent"
        );

        let response = self
            .endpoint
            .client
            .post(self.endpoint.generate_url(&self.model))
            .header("x-goog-api-key", &self.endpoint.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| types::convert_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(types::convert_status_error(status.as_u16(), &body));
        }

        let body: types::GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| types::convert_transport_error(&e))?;

        types::convert_response(body, self.model.as_str())
    }

    /// Append a user turn, call the API, and record the model's turn.
    ///
    /// A failed call leaves the history as it was.
    async fn send_user_parts(
        &self,
        parts: Vec<Part>,
        generation_config: GenerationConfig,
        with_tools: bool,
    ) -> Result<LlmResponse, GatewayError> {
        let mut contents = self.contents.lock().await;
        contents.push(Content::user(parts));

        match self.generate(&contents, generation_config, with_tools).await {
            Ok((response, model_turn)) => {
                if let Some(turn) = model_turn.filter(|t| !t.parts.is_empty()) {
                    contents.push(turn);
                }
                Ok(response)
            }
            Err(e) => {
                contents.pop();
                Err(e)
            }
        }
    }

    fn plain_config(&self) -> GenerationConfig {
        GenerationConfig {
            max_output_tokens: Some(self.endpoint.max_output_tokens),
            ..Default::default()
        }
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let response = self
            .send_user_parts(vec![Part::text(content)], self.plain_config(), false)
            .await?;
        Ok(response.text_content())
    }

    async fn send_structured(
        &self,
        content: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        let config = GenerationConfig::structured(self.endpoint.max_output_tokens, schema);
        let response = self
            .send_user_parts(vec![Part::text(content)], config, false)
            .await?;
        let text = response.text_content();

        serde_json::from_str::<serde_json::Value>(text.trim())
            .ok()
            .filter(|v| v.is_object())
            .or_else(|| extract_json_object(&text))
            .ok_or_else(|| {
                GatewayError::InvalidResponse("model reply contained no JSON object".to_string())
            })
    }

    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError> {
        let declarations: Vec<types::FunctionDeclaration> = tools
            .iter()
            .filter_map(types::convert_tool_schema)
            .collect();

        if !declarations.is_empty() {
            *self.tools.lock().await = Some(vec![Tool {
                function_declarations: declarations,
            }]);
        }

        self.send_user_parts(vec![Part::text(content)], self.plain_config(), true)
            .await
    }

    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError> {
        let parts: Vec<Part> = results.iter().map(types::convert_tool_result).collect();
        self.send_user_parts(parts, self.plain_config(), true).await
    }
}
