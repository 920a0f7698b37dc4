//! Provider formatting helpers.

use serde_json::Value;

/// Convert a tool result JSON value into a string payload for providers.
pub(crate) fn tool_result_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_are_passed_through_unquoted() {
        assert_eq!(tool_result_to_string(&json!("plain")), "plain");
    }

    #[test]
    fn objects_are_serialized_as_json() {
        let value = json!({"error": "Invalid API response format."});
        assert_eq!(
            tool_result_to_string(&value),
            r#"{"error":"Invalid API response format."}"#
        );
    }
}
