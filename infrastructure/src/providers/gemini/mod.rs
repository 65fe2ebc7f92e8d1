//! Google Gemini `generateContent` provider
//!
//! API-key authenticated REST access to Gemini models, with native
//! function calling and JSON-schema constrained output.

mod gateway;
mod session;
mod types;

pub use gateway::{GeminiConfig, GeminiGateway};
pub use session::GeminiSession;
