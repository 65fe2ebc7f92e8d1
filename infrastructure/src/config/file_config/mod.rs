//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing fields take their defaults.

mod models;
mod output;
mod provider;
mod server;
mod tools;

pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use provider::FileProviderConfig;
pub use server::FileServerConfig;
pub use tools::FileToolsConfig;

use serde::{Deserialize, Serialize};

/// A configuration problem found by [`FileConfig::validate`].
///
/// Issues are reported as warnings; the affected value falls back to its
/// default or is used as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted path of the offending field (e.g. `models.router`).
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Per-stage model selection
    pub models: FileModelsConfig,
    /// Gemini API settings
    pub provider: FileProviderConfig,
    /// Tool loop and constants settings
    pub tools: FileToolsConfig,
    /// HTTP server settings
    pub server: FileServerConfig,
    /// Console output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.models.validate());
        issues.extend(self.provider.validate());
        issues.extend(self.tools.validate());
        issues.extend(self.server.validate());
        issues.extend(self.output.validate());
        issues
    }
}
