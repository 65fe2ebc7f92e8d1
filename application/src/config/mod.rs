//! Application-level configuration.
//!
//! - [`ExecutionParams`]: tool loop control
//! - [`ModelConfig`]: which model each pipeline stage talks to

pub mod execution_params;
pub mod model_config;

pub use execution_params::ExecutionParams;
pub use model_config::ModelConfig;
