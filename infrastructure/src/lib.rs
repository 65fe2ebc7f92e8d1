//! Infrastructure layer for TutorVerse
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod constants;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileModelsConfig, FileOutputConfig,
    FileProviderConfig, FileServerConfig, FileToolsConfig,
};
pub use constants::{ConstantsLoadError, load_constants};
pub use logging::JsonlConversationLogger;
pub use providers::{GeminiConfig, GeminiGateway};
pub use tools::{JsonSchemaToolConverter, LocalToolExecutor, default_tool_spec};
