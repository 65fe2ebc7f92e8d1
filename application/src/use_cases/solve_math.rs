//! Solve Math use case.
//!
//! Produces a step-by-step solution with the `calculator` tool available.

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::HandlerError;
use crate::use_cases::tool_loop::run_tool_loop;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use tutor_domain::session::structured::{extract_json_object, string_field};
use tutor_domain::{Model, Question, TutorPrompt};

/// Tools exposed to the math handler.
pub const MATH_TOOLS: [&str; 1] = ["calculator"];

/// A math handler's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSolution {
    pub solution: String,
}

/// Answers math questions.
#[async_trait]
pub trait MathSolver: Send + Sync {
    async fn solve(&self, question: &Question) -> Result<MathSolution, HandlerError>;
}

/// Math handler backed by an LLM with calculator tool access.
pub struct LlmMathHandler {
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    model: Model,
    execution: ExecutionParams,
}

impl LlmMathHandler {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
        model: Model,
    ) -> Self {
        Self {
            gateway,
            tool_executor,
            tool_schema,
            model,
            execution: ExecutionParams::default(),
        }
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }
}

/// Pull the solution out of the model's final text.
///
/// A `{"solution": ...}` object wins; otherwise the whole text is the
/// solution.
fn parse_solution(final_text: &str) -> Option<String> {
    if let Some(value) = extract_json_object(final_text)
        && let Some(solution) = string_field(&value, "solution")
    {
        return Some(solution.to_string());
    }
    let trimmed = final_text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[async_trait]
impl MathSolver for LlmMathHandler {
    async fn solve(&self, question: &Question) -> Result<MathSolution, HandlerError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, TutorPrompt::math_system())
            .await?;

        let tools = self
            .tool_schema
            .selected_tools_schema(self.tool_executor.tool_spec(), &MATH_TOOLS);
        debug!("Math: using model {}, {} tools", self.model, tools.len());

        let outcome = run_tool_loop(
            session.as_ref(),
            &TutorPrompt::math_query(question.content()),
            &tools,
            self.tool_executor.as_ref(),
            self.execution.max_tool_turns,
        )
        .await?;

        if outcome.hit_turn_limit {
            return Err(HandlerError::ToolTurnLimit(self.execution.max_tool_turns));
        }

        let solution = parse_solution(&outcome.final_text).ok_or(HandlerError::EmptyResponse)?;
        info!("Math solved in {} tool turns", outcome.turns);

        Ok(MathSolution { solution })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::test_support::{
        MockGateway, MockSession, MockToolExecutor, MockToolSchema, text, tool_use,
    };
    use serde_json::json;

    fn handler(session: MockSession) -> LlmMathHandler {
        LlmMathHandler::new(
            Arc::new(MockGateway::new(vec![session])),
            Arc::new(MockToolExecutor::new()),
            Arc::new(MockToolSchema),
            Model::default(),
        )
    }

    fn question(q: &str) -> Question {
        Question::try_new(q).unwrap()
    }

    #[tokio::test]
    async fn test_json_solution() {
        let session = MockSession::new(vec![
            tool_use("c1", "calculator", json!({"expression": "0.15*200"})),
            text(r#"{"solution": "30"}"#),
        ]);
        let result = handler(session)
            .solve(&question("What is 15% of 200?"))
            .await
            .unwrap();
        assert_eq!(result.solution, "30");
    }

    #[tokio::test]
    async fn test_plain_text_solution() {
        let session = MockSession::new(vec![text("Step 1: 2 + 2 = 4\n")]);
        let result = handler(session).solve(&question("2+2")).await.unwrap();
        assert_eq!(result.solution, "Step 1: 2 + 2 = 4");
    }

    #[tokio::test]
    async fn test_empty_response() {
        let session = MockSession::new(vec![text("")]);
        let err = handler(session).solve(&question("2+2")).await.unwrap_err();
        assert!(matches!(err, HandlerError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_turn_limit_is_an_error_not_an_answer() {
        let mut first = tool_use("c1", "calculator", json!({"expression": "2^10"}));
        first.content.insert(
            0,
            tutor_domain::ContentBlock::Text("Let me compute that.".to_string()),
        );
        let session = MockSession::new(vec![
            first,
            tool_use("c2", "calculator", json!({"expression": "2^10"})),
            tool_use("c3", "calculator", json!({"expression": "2^10"})),
        ]);
        let handler =
            handler(session).with_execution(ExecutionParams::default().with_max_tool_turns(2));

        let err = handler.solve(&question("What is 2^10?")).await.unwrap_err();
        assert!(matches!(err, HandlerError::ToolTurnLimit(2)));
        assert_eq!(
            err.category(),
            Some(tutor_domain::ErrorCategory::HandlerFailure)
        );
    }

    #[tokio::test]
    async fn test_gateway_failure() {
        let session = MockSession::failing(GatewayError::Auth("invalid api key".to_string()));
        let err = handler(session).solve(&question("2+2")).await.unwrap_err();
        assert!(matches!(err, HandlerError::Gateway(GatewayError::Auth(_))));
    }

    #[test]
    fn test_parse_solution_ignores_blank_json_field() {
        assert_eq!(
            parse_solution(r#"{"solution": ""}"#).as_deref(),
            Some(r#"{"solution": ""}"#)
        );
        assert_eq!(parse_solution("  "), None);
    }
}
