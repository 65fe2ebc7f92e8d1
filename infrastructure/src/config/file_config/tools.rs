//! Tools configuration from TOML (`[tools]` section)
//!
//! ```toml
//! [tools]
//! max_tool_turns = 8
//! constants_file = "constants.json"   # optional, replaces the builtin table
//! ```

use super::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tutor_application::ExecutionParams;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Maximum tool turns per handler call.
    pub max_tool_turns: usize,
    /// JSON file with physical constants (None = builtin table).
    pub constants_file: Option<PathBuf>,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            max_tool_turns: ExecutionParams::default().max_tool_turns,
            constants_file: None,
        }
    }
}

impl FileToolsConfig {
    /// Convert to execution parameters; 0 falls back to the default.
    pub fn to_execution_params(&self) -> ExecutionParams {
        match self.max_tool_turns {
            0 => ExecutionParams::default(),
            turns => ExecutionParams::default().with_max_tool_turns(turns),
        }
    }

    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        if self.max_tool_turns == 0 {
            vec![ConfigIssue::new(
                "tools.max_tool_turns",
                format!(
                    "max_tool_turns cannot be 0, using {}",
                    ExecutionParams::default().max_tool_turns
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_turns_falls_back() {
        let config = FileToolsConfig {
            max_tool_turns: 0,
            constants_file: None,
        };
        assert_eq!(config.to_execution_params(), ExecutionParams::default());
        assert_eq!(config.validate().len(), 1);
    }
}
