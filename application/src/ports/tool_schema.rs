//! Tool schema conversion port.
//!
//! Separates "which tools a handler exposes" (application) from "how to
//! serialize them for the provider API" (infrastructure).

use tutor_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to provider-neutral JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to JSON Schema.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools to a JSON Schema array (sorted by name).
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;

    /// Convert the named tools only (sorted by name). Unknown names are skipped.
    fn selected_tools_schema(&self, spec: &ToolSpec, names: &[&str]) -> Vec<serde_json::Value> {
        self.all_tools_schema(&spec.subset(names))
    }
}
