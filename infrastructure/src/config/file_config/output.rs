//! Output configuration from TOML (`[output]` section)

use super::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format: "text" or "json" (the `--output` flag wins)
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        match self.format.as_deref() {
            None | Some("text") | Some("json") => Vec::new(),
            Some(other) => vec![ConfigIssue::new(
                "output.format",
                format!("unknown value '{}', expected \"text\" or \"json\"", other),
            )],
        }
    }
}
