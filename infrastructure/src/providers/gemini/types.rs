//! Gemini `generateContent` wire types and conversions
//!
//! Request/response bodies of the REST API, plus conversions to the domain
//! `LlmResponse` and from the application's tool schemas and results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tutor_application::ports::llm_gateway::{GatewayError, ToolResultMessage};
use tutor_domain::{ContentBlock, LlmResponse};

// ─── Wire types ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }

    pub fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// One part of a content turn. Exactly one field is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    /// Opaque signature the model attaches to some parts; echoed back verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub response: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    /// Ask for a JSON reply conforming to `schema`.
    pub fn structured(max_output_tokens: u32, schema: &serde_json::Value) -> Self {
        Self {
            max_output_tokens: Some(max_output_tokens),
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

// ─── Gemini → Domain ─────────────────────────────────────────────

/// Convert the parts of a model turn to domain content blocks.
///
/// Function calls without a provider ID get a positional one so results can
/// be correlated.
pub fn convert_parts(parts: &[Part]) -> Vec<ContentBlock> {
    parts
        .iter()
        .enumerate()
        .filter_map(|(index, part)| {
            if let Some(call) = &part.function_call {
                let input: HashMap<String, serde_json::Value> = call
                    .args
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                Some(ContentBlock::ToolUse {
                    id: call
                        .id
                        .clone()
                        .unwrap_or_else(|| format!("{}-{}", call.name, index)),
                    name: call.name.clone(),
                    input,
                })
            } else {
                part.text.clone().map(ContentBlock::Text)
            }
        })
        .collect()
}

/// Convert a response to a domain LlmResponse.
///
/// Returns the model's content turn alongside, for the session history.
pub fn convert_response(
    response: GenerateContentResponse,
    model_id: &str,
) -> Result<(LlmResponse, Option<Content>), GatewayError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(GatewayError::InvalidResponse(format!(
            "Gemini returned no answer: {}",
            reason
        )));
    };

    let content = candidate
        .content
        .as_ref()
        .map(|c| convert_parts(&c.parts))
        .unwrap_or_default();

    let llm_response = LlmResponse {
        content,
        model: Some(response.model_version.unwrap_or_else(|| model_id.to_string())),
    };

    Ok((llm_response, candidate.content))
}

// ─── Domain → Gemini ─────────────────────────────────────────────

/// Convert a JSON tool schema (from ToolSchemaPort) to a function declaration.
pub fn convert_tool_schema(schema: &serde_json::Value) -> Option<FunctionDeclaration> {
    let name = schema.get("name")?.as_str()?;
    let description = schema
        .get("description")
        .and_then(|d| d.as_str())
        .unwrap_or_default();

    Some(FunctionDeclaration {
        name: name.to_string(),
        description: description.to_string(),
        parameters: schema.get("input_schema").cloned(),
    })
}

/// Convert a domain ToolResultMessage to a `functionResponse` part.
pub fn convert_tool_result(result: &ToolResultMessage) -> Part {
    let response = if result.is_error {
        serde_json::json!({ "error": result.output })
    } else {
        serde_json::json!({ "result": result.output })
    };

    Part {
        function_response: Some(FunctionResponse {
            id: None,
            name: result.tool_name.clone(),
            response,
        }),
        ..Default::default()
    }
}

// ─── Errors ──────────────────────────────────────────────────────

/// Map a non-2xx status and its body to a GatewayError.
///
/// The provider's message is kept so keyword classification still works
/// for statuses without a dedicated variant (e.g. 400 "API key not valid").
pub fn convert_status_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| {
            if e.error.status.is_empty() {
                e.error.message
            } else {
                format!("{} ({})", e.error.message, e.error.status)
            }
        })
        .unwrap_or_else(|_| format!("HTTP {}", status));

    match status {
        401 | 403 => GatewayError::Auth(message),
        429 => GatewayError::Quota(message),
        404 => GatewayError::ModelNotAvailable(message),
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status, message)),
    }
}

/// Map a reqwest transport error to a GatewayError.
pub fn convert_transport_error(err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() {
        GatewayError::ConnectionError(err.to_string())
    } else if err.is_decode() {
        GatewayError::InvalidResponse(err.to_string())
    } else {
        GatewayError::RequestFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tutor_domain::ErrorCategory;

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text("2+2?")])],
            system_instruction: Some(Content::system("You are a math tutor.")),
            tools: Some(vec![Tool {
                function_declarations: vec![FunctionDeclaration {
                    name: "calculator".to_string(),
                    description: "Evaluate".to_string(),
                    parameters: Some(json!({"type": "object"})),
                }],
            }]),
            generation_config: Some(GenerationConfig {
                max_output_tokens: Some(2048),
                ..Default::default()
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "2+2?");
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "You are a math tutor."
        );
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(
            value["tools"][0]["functionDeclarations"][0]["name"],
            "calculator"
        );
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
        assert!(value["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn test_structured_generation_config() {
        let schema = json!({"type": "object", "properties": {"route": {"type": "string"}}});
        let value = serde_json::to_value(GenerationConfig::structured(512, &schema)).unwrap();
        assert_eq!(value["responseMimeType"], "application/json");
        assert_eq!(value["responseSchema"], schema);
    }

    #[test]
    fn test_convert_text_response() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "The answer is "}, {"text": "4."}]},
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-2.0-flash-001"
        }))
        .unwrap();

        let (llm, content) = convert_response(response, "gemini-2.0-flash").unwrap();
        assert_eq!(llm.text_content(), "The answer is 4.");
        assert_eq!(llm.model.as_deref(), Some("gemini-2.0-flash-001"));
        assert_eq!(content.unwrap().role.as_deref(), Some("model"));
    }

    #[test]
    fn test_convert_function_call_response() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"functionCall": {"name": "getConstant", "args": {"name": "speedOfLight"}}}
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let (llm, _) = convert_response(response, "gemini-2.0-flash").unwrap();

        let calls = llm.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "getConstant");
        assert_eq!(calls[0].get_string("name"), Some("speedOfLight"));
        assert_eq!(calls[0].native_id.as_deref(), Some("getConstant-0"));
    }

    #[test]
    fn test_convert_blocked_response() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();

        let err = convert_response(response, "m").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(ref m) if m.contains("SAFETY")));
    }

    #[test]
    fn test_convert_tool_schema() {
        let schema = json!({
            "name": "calculator",
            "description": "Evaluate",
            "input_schema": {
                "type": "object",
                "properties": {"expression": {"type": "string"}},
                "required": ["expression"]
            }
        });
        let declaration = convert_tool_schema(&schema).unwrap();
        assert_eq!(declaration.name, "calculator");
        assert_eq!(
            declaration.parameters.unwrap()["required"],
            json!(["expression"])
        );
        assert!(convert_tool_schema(&json!({"description": "No name"})).is_none());
    }

    #[test]
    fn test_convert_tool_result() {
        let ok = convert_tool_result(&ToolResultMessage {
            tool_use_id: "calculator-0".to_string(),
            tool_name: "calculator".to_string(),
            output: "4".to_string(),
            is_error: false,
        });
        let response = ok.function_response.unwrap();
        assert_eq!(response.name, "calculator");
        assert_eq!(response.response, json!({"result": "4"}));

        let failed = convert_tool_result(&ToolResultMessage {
            tool_use_id: "calculator-0".to_string(),
            tool_name: "calculator".to_string(),
            output: "[INVALID_ARGUMENT] NaN".to_string(),
            is_error: true,
        });
        assert_eq!(
            failed.function_response.unwrap().response,
            json!({"error": "[INVALID_ARGUMENT] NaN"})
        );
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(convert_status_error(429, body), GatewayError::Quota(_)));
        assert!(matches!(convert_status_error(401, ""), GatewayError::Auth(_)));
        assert!(matches!(convert_status_error(403, ""), GatewayError::Auth(_)));
        assert!(matches!(
            convert_status_error(404, ""),
            GatewayError::ModelNotAvailable(_)
        ));
        assert!(matches!(
            convert_status_error(500, "oops"),
            GatewayError::RequestFailed(ref m) if m == "HTTP 500: HTTP 500"
        ));
    }

    #[test]
    fn test_bad_api_key_falls_back_to_text_classification() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        let err = convert_status_error(400, body);
        assert_eq!(err.category(), None);
        assert_eq!(
            ErrorCategory::classify(&err.to_string()),
            ErrorCategory::ProviderAuth
        );
    }
}
