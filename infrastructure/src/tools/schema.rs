//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces provider-neutral
//! JSON Schema. The Gemini adapter turns it into `functionDeclarations`.

use tutor_application::ports::tool_schema::ToolSchemaPort;
use tutor_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Default implementation producing provider-neutral JSON Schema.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"number"` → `"number"`
/// - `"integer"` → `"integer"`
/// - `"boolean"` → `"boolean"`
/// - anything else → `"string"`
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": schema_type,
                    "description": param.description,
                }),
            );

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        let mut tools: Vec<&ToolDefinition> = spec.all().collect();
        tools.sort_by_key(|t| &t.name);
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::default_tool_spec;
    use tutor_domain::tool::entities::ToolParameter;

    #[test]
    fn test_tool_to_schema() {
        let tool = ToolDefinition::new("convert", "Convert units")
            .with_parameter(ToolParameter::new("value", "Value", true).with_type("number"))
            .with_parameter(ToolParameter::new("unit", "Target unit", false));

        let schema = JsonSchemaToolConverter.tool_to_schema(&tool);

        assert_eq!(schema["name"], "convert");
        assert_eq!(schema["input_schema"]["type"], "object");
        assert_eq!(
            schema["input_schema"]["properties"]["value"]["type"],
            "number"
        );
        assert_eq!(schema["input_schema"]["properties"]["unit"]["type"], "string");
        assert_eq!(schema["input_schema"]["required"], serde_json::json!(["value"]));
    }

    #[test]
    fn test_all_tools_schema_sorted() {
        let tools = JsonSchemaToolConverter.all_tools_schema(&default_tool_spec());
        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(names, vec!["calculator", "getConstant"]);
    }

    #[test]
    fn test_selected_tools_schema() {
        let tools = JsonSchemaToolConverter
            .selected_tools_schema(&default_tool_spec(), &["calculator", "unknown"]);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "calculator");
        assert_eq!(
            tools[0]["input_schema"]["required"],
            serde_json::json!(["expression"])
        );
    }
}
