//! Hand-written mock ports shared by the use case tests.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession, ToolResultMessage};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tutor_domain::session::response::{ContentBlock, LlmResponse};
use tutor_domain::tool::entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
use tutor_domain::{ConstantTable, Model, ToolError, ToolResult, evaluate};

// ==================== Responses ====================

/// A response asking for one tool call.
pub fn tool_use(id: &str, name: &str, args: serde_json::Value) -> LlmResponse {
    let input: HashMap<String, serde_json::Value> = args
        .as_object()
        .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default();
    LlmResponse {
        content: vec![ContentBlock::ToolUse {
            id: id.to_string(),
            name: name.to_string(),
            input,
        }],
        model: None,
    }
}

pub fn text(reply: &str) -> LlmResponse {
    LlmResponse::from_text(reply)
}

// ==================== Session ====================

/// Session that replays scripted responses in order and records tool results.
pub struct MockSession {
    model: Model,
    responses: Mutex<VecDeque<Result<LlmResponse, GatewayError>>>,
    sent_results: Arc<Mutex<Vec<ToolResultMessage>>>,
}

impl MockSession {
    pub fn new(responses: Vec<LlmResponse>) -> Self {
        Self::scripted(responses.into_iter().map(Ok).collect())
    }

    pub fn scripted(responses: Vec<Result<LlmResponse, GatewayError>>) -> Self {
        Self {
            model: Model::default(),
            responses: Mutex::new(VecDeque::from(responses)),
            sent_results: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(err: GatewayError) -> Self {
        Self::scripted(vec![Err(err)])
    }

    /// Handle to the tool results this session receives.
    pub fn sent_results(&self) -> Arc<Mutex<Vec<ToolResultMessage>>> {
        self.sent_results.clone()
    }

    fn next(&self) -> Result<LlmResponse, GatewayError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
    }
}

#[async_trait]
impl LlmSession for MockSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, _content: &str) -> Result<String, GatewayError> {
        self.next().map(|r| r.text_content())
    }

    async fn send_with_tools(
        &self,
        _content: &str,
        _tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError> {
        self.next()
    }

    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError> {
        self.sent_results
            .lock()
            .unwrap()
            .extend(results.iter().cloned());
        self.next()
    }
}

// ==================== Gateway ====================

/// Gateway that hands out pre-built sessions in order.
pub struct MockGateway {
    sessions: Mutex<VecDeque<MockSession>>,
    system_prompts: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new(sessions: Vec<MockSession>) -> Self {
        Self {
            sessions: Mutex::new(VecDeque::from(sessions)),
            system_prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn system_prompts(&self) -> Vec<String> {
        self.system_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn create_session_with_system_prompt(
        &self,
        _model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.system_prompts
            .lock()
            .unwrap()
            .push(system_prompt.to_string());
        self.sessions
            .lock()
            .unwrap()
            .pop_front()
            .map(|s| Box::new(s) as Box<dyn LlmSession>)
            .ok_or_else(|| GatewayError::Other("No session scripted".to_string()))
    }
}

// ==================== Tools ====================

/// Executor with the real calculator and builtin constants, counting calls.
pub struct MockToolExecutor {
    spec: ToolSpec,
    calls: AtomicUsize,
}

impl MockToolExecutor {
    pub fn new() -> Self {
        Self {
            spec: ToolSpec::new()
                .register(
                    ToolDefinition::new("calculator", "Evaluate arithmetic").with_parameter(
                        ToolParameter::new("expression", "Expression", true),
                    ),
                )
                .register(
                    ToolDefinition::new("getConstant", "Look up a constant")
                        .with_parameter(ToolParameter::new("name", "Constant key", true)),
                ),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolExecutorPort for MockToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match call.tool_name.as_str() {
            "calculator" => {
                let value = evaluate(call.get_string("expression").unwrap_or(""));
                if value.is_nan() {
                    ToolResult::failure("calculator", ToolError::invalid_argument("NaN"))
                } else {
                    ToolResult::success("calculator", value.to_string())
                }
            }
            "getConstant" => {
                match ConstantTable::builtin().lookup(call.get_string("name").unwrap_or("")) {
                    Ok(entry) => ToolResult::success("getConstant", entry.value_with_unit()),
                    Err(e) => ToolResult::failure("getConstant", ToolError::not_found(e.to_string())),
                }
            }
            other => ToolResult::failure(other, ToolError::not_found("unknown tool")),
        }
    }
}

pub struct MockToolSchema;

impl ToolSchemaPort for MockToolSchema {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": { "type": "object", "properties": {}, "required": [] }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        let mut tools: Vec<_> = spec.all().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}
