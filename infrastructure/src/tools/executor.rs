//! Local tool executor: the concrete implementation of [`ToolExecutorPort`].
//!
//! Both tools are pure and fast and run inline on the calling task.

use super::{calculator, constant};
use async_trait::async_trait;
use std::sync::Arc;
use tutor_application::ports::tool_executor::ToolExecutorPort;
use tutor_domain::ConstantTable;
use tutor_domain::tool::{
    entities::{ToolCall, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};

/// Executor that runs the tutor tools in-process.
#[derive(Debug, Clone)]
pub struct LocalToolExecutor {
    /// Available tools
    tool_spec: ToolSpec,
    /// Table served by `getConstant`
    constants: Arc<ConstantTable>,
}

impl LocalToolExecutor {
    /// Create an executor with all tools, serving `constants`.
    pub fn new(constants: Arc<ConstantTable>) -> Self {
        Self::with_tools(super::default_tool_spec(), constants)
    }

    /// Create an executor with a custom tool spec
    pub fn with_tools(tool_spec: ToolSpec, constants: Arc<ConstantTable>) -> Self {
        Self {
            tool_spec,
            constants,
        }
    }

    pub fn constants(&self) -> &Arc<ConstantTable> {
        &self.constants
    }

    fn execute_internal(&self, call: &ToolCall) -> ToolResult {
        let Some(definition) = self.tool_spec.get(&call.tool_name) else {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("Unknown tool: {}", call.tool_name)),
            );
        };

        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(e));
        }

        match call.tool_name.as_str() {
            calculator::CALCULATOR => calculator::execute_calculator(call),
            constant::GET_CONSTANT => constant::execute_get_constant(&self.constants, call),
            other => ToolResult::failure(
                other,
                ToolError::execution_failed(format!("Tool '{}' has no implementation", other)),
            ),
        }
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.execute_internal(call)
    }
}
