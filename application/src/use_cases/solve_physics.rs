//! Solve Physics use case.
//!
//! Answers physics questions with `getConstant` and `calculator` tools, and
//! reports which constants the answer relied on. Every reported key resolves
//! in the constants table.

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::HandlerError;
use crate::use_cases::tool_loop::run_tool_loop;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tutor_domain::session::structured::{extract_json_object, string_field, string_list_field};
use tutor_domain::tool::entities::ToolCall;
use tutor_domain::{ConstantTable, Model, Question, TutorPrompt};

/// Tools exposed to the physics handler.
pub const PHYSICS_TOOLS: [&str; 2] = ["getConstant", "calculator"];

/// A physics handler's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicsAnswer {
    pub answer: String,
    /// Constant keys the answer used. Unique, all resolvable.
    pub constants_used: Vec<String>,
}

/// Answers physics questions.
#[async_trait]
pub trait PhysicsSolver: Send + Sync {
    async fn solve(&self, question: &Question) -> Result<PhysicsAnswer, HandlerError>;
}

/// Physics handler backed by an LLM with constant lookup and calculator tools.
pub struct LlmPhysicsHandler {
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    constants: Arc<ConstantTable>,
    model: Model,
    execution: ExecutionParams,
}

impl LlmPhysicsHandler {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
        constants: Arc<ConstantTable>,
        model: Model,
    ) -> Self {
        Self {
            gateway,
            tool_executor,
            tool_schema,
            constants,
            model,
            execution: ExecutionParams::default(),
        }
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }

    /// Deduplicate (first-seen order) and drop keys the table cannot resolve.
    fn resolvable_keys<I>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for key in keys {
            if kept.contains(&key) {
                continue;
            }
            if self.constants.contains(&key) {
                kept.push(key);
            } else {
                warn!("Dropping unknown constant key reported by model: {}", key);
            }
        }
        kept
    }
}

/// Keys the model successfully retrieved through `getConstant`.
fn retrieved_keys(calls: &[ToolCall]) -> Vec<String> {
    calls
        .iter()
        .filter(|c| c.tool_name == "getConstant")
        .filter_map(|c| c.get_string("name"))
        .map(|s| s.to_string())
        .collect()
}

#[async_trait]
impl PhysicsSolver for LlmPhysicsHandler {
    async fn solve(&self, question: &Question) -> Result<PhysicsAnswer, HandlerError> {
        let keys: Vec<&str> = self.constants.keys().collect();
        let system_prompt = TutorPrompt::physics_system(&keys);
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, &system_prompt)
            .await?;

        let tools = self
            .tool_schema
            .selected_tools_schema(self.tool_executor.tool_spec(), &PHYSICS_TOOLS);
        debug!("Physics: using model {}, {} tools", self.model, tools.len());

        let outcome = run_tool_loop(
            session.as_ref(),
            &TutorPrompt::physics_query(question.content()),
            &tools,
            self.tool_executor.as_ref(),
            self.execution.max_tool_turns,
        )
        .await?;

        if outcome.hit_turn_limit {
            return Err(HandlerError::ToolTurnLimit(self.execution.max_tool_turns));
        }

        let structured = extract_json_object(&outcome.final_text);
        let (answer, reported) = match structured
            .as_ref()
            .and_then(|v| string_field(v, "answer").map(|a| (v, a)))
        {
            Some((value, answer)) => (
                answer.to_string(),
                string_list_field(value, "constantsUsed"),
            ),
            None => (
                outcome.final_text.trim().to_string(),
                retrieved_keys(&outcome.successful_calls),
            ),
        };

        if answer.is_empty() {
            return Err(HandlerError::EmptyResponse);
        }

        let constants_used = self.resolvable_keys(reported);
        info!(
            "Physics answered in {} tool turns using {} constants",
            outcome.turns,
            constants_used.len()
        );

        Ok(PhysicsAnswer {
            answer,
            constants_used,
        })
    }
}
