//! Execution parameters: handler loop control.
//!
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Tool loop control parameters shared by the math and physics handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum tool use turns in a single handler call.
    pub max_tool_turns: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self { max_tool_turns: 8 }
    }
}

impl ExecutionParams {
    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }
}
