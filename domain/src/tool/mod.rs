//! Tool domain module
//!
//! Tools are narrow, schema-typed functions a model may call in the middle of
//! a generation (the calculator and the constant lookup).
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (offered)    │    │ (invocation) │    │ (output)     │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! A failed [`ToolResult`](value_objects::ToolResult) goes back to the model
//! as an error-flagged response; it never aborts the handler by itself.

pub mod entities;
pub mod traits;
pub mod value_objects;
