//! getConstant tool: look up a physical constant by key

use std::time::Instant;
use tutor_domain::ConstantTable;
use tutor_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};

/// Tool name constant
pub const GET_CONSTANT: &str = "getConstant";

/// Get the tool definition for getConstant
pub fn get_constant_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_CONSTANT,
        "Retrieves the value and unit of a physical constant by its key name (e.g. 'speedOfLight', 'gravitationalConstant').",
    )
    .with_parameter(
        ToolParameter::new(
            "name",
            "The key name of the physical constant, e.g. 'speedOfLight'",
            true,
        )
        .with_type("string"),
    )
}

/// Execute the getConstant tool against `table`
///
/// Returns `"<value> <unit>"`. An unknown key is a `NOT_FOUND` error whose
/// details list the valid keys.
pub fn execute_get_constant(table: &ConstantTable, call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let key = match call.require_string("name") {
        Ok(k) => k.trim(),
        Err(e) => return ToolResult::failure(GET_CONSTANT, ToolError::invalid_argument(e)),
    };

    let result = match table.lookup(key) {
        Ok(entry) => ToolResult::success(GET_CONSTANT, entry.value_with_unit()),
        Err(e) => ToolResult::failure(
            GET_CONSTANT,
            ToolError::not_found(e.to_string()).with_details(format!(
                "valid keys: {}",
                table.keys().collect::<Vec<_>>().join(", ")
            )),
        ),
    };

    result.with_duration(start.elapsed().as_micros() as u64)
}
