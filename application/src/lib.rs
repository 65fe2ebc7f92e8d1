//! Application layer for TutorVerse
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ExecutionParams, ModelConfig};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession, ToolResultMessage},
    progress::{DispatchProgress, DispatchStage, NoDispatchProgress},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::dispatch::DispatchUseCase;
pub use use_cases::route_question::{LlmQuestionRouter, QuestionRouter, RouteError};
pub use use_cases::solve_math::{LlmMathHandler, MathSolution, MathSolver};
pub use use_cases::solve_physics::{LlmPhysicsHandler, PhysicsAnswer, PhysicsSolver};
pub use use_cases::tool_loop::{ToolLoopOutcome, run_tool_loop};
pub use use_cases::HandlerError;
