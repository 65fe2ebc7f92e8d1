//! Per-stage model selection.

use serde::{Deserialize, Serialize};
use tutor_domain::Model;

/// Models used by each stage of the dispatch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Intent classification.
    pub router: Model,
    /// Math handler.
    pub math: Model,
    /// Physics handler.
    pub physics: Model,
}

impl ModelConfig {
    pub fn with_router(mut self, model: Model) -> Self {
        self.router = model;
        self
    }

    pub fn with_math(mut self, model: Model) -> Self {
        self.math = model;
        self
    }

    pub fn with_physics(mut self, model: Model) -> Self {
        self.physics = model;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_flash_everywhere() {
        let config = ModelConfig::default();
        assert_eq!(config.router, Model::Gemini20Flash);
        assert_eq!(config.math, Model::Gemini20Flash);
        assert_eq!(config.physics, Model::Gemini20Flash);
    }

    #[test]
    fn test_builders() {
        let config = ModelConfig::default()
            .with_math(Model::Gemini25Pro)
            .with_physics(Model::Custom("my-model".to_string()));
        assert_eq!(config.router, Model::Gemini20Flash);
        assert_eq!(config.math, Model::Gemini25Pro);
        assert_eq!(config.physics.as_str(), "my-model");
    }
}
