//! LLM provider adapters

pub mod gemini;

pub use gemini::{GeminiConfig, GeminiGateway};
