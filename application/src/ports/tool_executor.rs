//! Tool Executor port
//!
//! Defines the interface for executing the tools a handler exposes to the
//! model (calculator, getConstant).

use async_trait::async_trait;
use tutor_domain::tool::{
    entities::{ToolCall, ToolSpec},
    value_objects::ToolResult,
};

/// Port for tool execution
///
/// Tool failures are reported inside the returned [`ToolResult`], never as
/// Rust errors, so the model can see them and retry.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Execute a tool call
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
