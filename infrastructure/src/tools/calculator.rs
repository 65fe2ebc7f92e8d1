//! calculator tool: evaluate an arithmetic expression

use std::time::Instant;
use tutor_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use tutor_domain::try_evaluate;

/// Tool name constant
pub const CALCULATOR: &str = "calculator";

/// Integral results below this magnitude print without a fractional part.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Get the tool definition for calculator
pub fn calculator_definition() -> ToolDefinition {
    ToolDefinition::new(
        CALCULATOR,
        "Evaluates a mathematical expression. Supports + - * / ^ and parentheses, e.g. \"2*(3+4)^2\". Returns NaN when the expression cannot be evaluated.",
    )
    .with_parameter(
        ToolParameter::new(
            "expression",
            "The mathematical expression to evaluate. Example: \"(15/100)*200\"",
            true,
        )
        .with_type("string"),
    )
}

/// Format a finite result as a JSON number literal.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Execute the calculator tool
///
/// Failures come back as `NaN` with the reason in the error details, so the
/// model can fix the expression and retry.
pub fn execute_calculator(call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let expression = match call.require_string("expression") {
        Ok(e) => e,
        Err(e) => return ToolResult::failure(CALCULATOR, ToolError::invalid_argument(e)),
    };

    let result = match try_evaluate(expression) {
        Ok(value) => ToolResult::success(CALCULATOR, format_number(value)),
        Err(e) => ToolResult::failure(
            CALCULATOR,
            ToolError::invalid_argument("NaN").with_details(e.to_string()),
        ),
    };

    result.with_duration(start.elapsed().as_micros() as u64)
}
