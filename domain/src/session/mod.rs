//! LLM session domain.
//!
//! - [`response::LlmResponse`]: text and tool-use blocks returned by a model
//! - [`structured`]: pulling JSON objects out of model text

pub mod response;
pub mod structured;
