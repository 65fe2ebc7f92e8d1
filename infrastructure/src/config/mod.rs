//! Configuration file loading for TutorVerse
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TUTORVERSE_` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./tutorverse.toml` or `./.tutorverse.toml`
//! 4. Global: `$XDG_CONFIG_HOME/tutorverse/config.toml` (or platform equivalent)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileModelsConfig, FileOutputConfig, FileProviderConfig,
    FileServerConfig, FileToolsConfig,
};
pub use loader::ConfigLoader;
