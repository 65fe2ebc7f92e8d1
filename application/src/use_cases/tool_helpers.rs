//! Shared helpers for the handler tool loops.

use tutor_domain::tool::entities::ToolCall;
use tutor_domain::truncate;

/// Extract a short preview string from tool call arguments.
///
/// Looks for the known argument keys (`expression`, `name`) first, then
/// falls back to the first string value found.
pub(crate) fn tool_args_preview(call: &ToolCall) -> String {
    let keys = ["expression", "name"];
    for key in &keys {
        if let Some(serde_json::Value::String(s)) = call.arguments.get(*key) {
            return truncate(s, 50);
        }
    }
    call.arguments
        .values()
        .find_map(|v| v.as_str())
        .map(|s| truncate(s, 50))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_preferred() {
        let call = ToolCall::new("calculator")
            .with_arg("other", "ignored")
            .with_arg("expression", "2*(3+4)");
        assert_eq!(tool_args_preview(&call), "2*(3+4)");
    }

    #[test]
    fn test_fallback_and_empty() {
        let call = ToolCall::new("custom").with_arg("query", "hello");
        assert_eq!(tool_args_preview(&call), "hello");
        assert_eq!(tool_args_preview(&ToolCall::new("custom")), "");
    }
}
