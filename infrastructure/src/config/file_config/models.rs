//! Per-stage model configuration from TOML (`[models]` section)

use super::ConfigIssue;
use serde::{Deserialize, Serialize};
use tutor_application::ModelConfig;
use tutor_domain::Model;

/// Per-stage model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// router = "gemini-2.0-flash"    # Intent classification
/// math = "gemini-2.0-flash"      # Math handler
/// physics = "gemini-2.0-flash"   # Physics handler
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub router: String,
    pub math: String,
    pub physics: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        let model = Model::default().to_string();
        Self {
            router: model.clone(),
            math: model.clone(),
            physics: model,
        }
    }
}

impl FileModelsConfig {
    /// Parse one model name; blank names fall back to the default model.
    fn parse(value: &str) -> Model {
        if value.trim().is_empty() {
            return Model::default();
        }
        // Model::from_str is infallible; unknown names become Custom(...)
        let Ok(model) = value.trim().parse();
        model
    }

    /// Convert to the application-layer model selection.
    pub fn to_model_config(&self) -> ModelConfig {
        ModelConfig {
            router: Self::parse(&self.router),
            math: Self::parse(&self.math),
            physics: Self::parse(&self.physics),
        }
    }

    pub(crate) fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("router", &self.router),
            ("math", &self.math),
            ("physics", &self.physics),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| {
            ConfigIssue::new(
                format!("models.{}", field),
                format!("model name cannot be empty, using {}", Model::default()),
            )
        })
        .collect()
    }
}
