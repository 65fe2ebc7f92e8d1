//! Provider configuration from TOML (`[provider]` section)

use super::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Environment variable consulted when the configured one is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Gemini API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Base URL for the Gemini API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Max output tokens per response.
    pub max_output_tokens: u32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 60,
            max_output_tokens: 2048,
        }
    }
}

impl FileProviderConfig {
    /// Read the API key from the configured env var, then `GOOGLE_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|key| !key.trim().is_empty())
    }

    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::new(
                "provider.api_key_env",
                "environment variable name cannot be empty",
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::new(
                "provider.timeout_secs",
                "timeout cannot be 0",
            ));
        }
        if self.max_output_tokens == 0 {
            issues.push(ConfigIssue::new(
                "provider.max_output_tokens",
                "max_output_tokens cannot be 0",
            ));
        }
        issues
    }
}
