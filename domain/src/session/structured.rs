//! Structured output extraction from model text.
//!
//! Models asked for a JSON object answer in one of three shapes: a bare
//! object, a ` ```json ` fenced block, or prose with an object embedded in
//! it. [`extract_json_object`] accepts all three.

use serde_json::Value;

/// Extract the first JSON object from model output.
///
/// Tries, in order:
/// 1. the whole (trimmed) text as a JSON object
/// 2. the contents of the first ` ``` ` / ` ```json ` fenced block
/// 3. the outermost `{ ... }` span
///
/// Returns `None` if no JSON object is found.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Some(value) = parse_object(trimmed) {
        return Some(value);
    }

    if let Some(block) = fenced_block(trimmed)
        && let Some(value) = parse_object(block)
    {
        return Some(value);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&trimmed[start..=end])
}

fn parse_object(text: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_open = &text[open + 3..];
    // Skip the info string (e.g. "json") up to the end of the line.
    let body_start = after_open.find('\n')? + 1;
    let body = &after_open[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

/// Read a string field, treating empty strings as absent.
pub fn string_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
}

/// Read an array-of-strings field, skipping non-string items.
pub fn string_list_field(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_object() {
        let value = extract_json_object(r#" {"route": "Math"} "#).unwrap();
        assert_eq!(value, json!({"route": "Math"}));
    }

    #[test]
    fn test_fenced_block() {
        let text = "Here you go:\n```json\n{\"solution\": \"x = 4\"}\n```\nDone.";
        let value = extract_json_object(text).unwrap();
        assert_eq!(string_field(&value, "solution"), Some("x = 4"));
    }

    #[test]
    fn test_embedded_object() {
        let text = "The result is {\"answer\": \"3e8 m/s\", \"constantsUsed\": [\"speedOfLight\"]} as requested";
        let value = extract_json_object(text).unwrap();
        assert_eq!(
            string_list_field(&value, "constantsUsed"),
            vec!["speedOfLight".to_string()]
        );
    }

    #[test]
    fn test_no_object() {
        assert!(extract_json_object("Step 1: add the numbers.").is_none());
        assert!(extract_json_object("[1, 2, 3]").is_none());
        assert!(extract_json_object("} oops {").is_none());
    }

    #[test]
    fn test_field_helpers() {
        let value = json!({"a": "", "b": ["x", 1, "y"], "c": "text"});
        assert_eq!(string_field(&value, "a"), None);
        assert_eq!(string_field(&value, "c"), Some("text"));
        assert_eq!(string_list_field(&value, "b"), vec!["x", "y"]);
        assert!(string_list_field(&value, "missing").is_empty());
    }
}
