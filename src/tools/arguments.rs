//! Typed access to tool call arguments.

use serde_json::Value;

use crate::error::AgentError;

/// Arguments of one tool call.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: Value,
}

impl ToolArguments {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Normalize arguments as sent by the model.
    ///
    /// Models sometimes send arguments as a JSON-encoded string; those are
    /// decoded, and an empty string becomes `{}`.
    pub fn from_call(value: &Value) -> Result<Self, AgentError> {
        let value = match value {
            Value::String(raw) if raw.trim().is_empty() => Value::Object(Default::default()),
            Value::String(raw) => serde_json::from_str(raw.trim()).map_err(|e| {
                AgentError::InvalidArgument(format!("arguments are not valid JSON: {e}"))
            })?,
            other => other.clone(),
        };
        Ok(Self { value })
    }

    pub fn raw(&self) -> &Value {
        &self.value
    }

    /// Deserialize the arguments into a typed struct.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, AgentError> {
        serde_json::from_value(self.value.clone()).map_err(|e| {
            AgentError::InvalidArgument(format!("Failed to deserialize arguments: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encoded_string_is_decoded() {
        let args =
            ToolArguments::from_call(&json!(r#"{"currency_from":"USD","currency_to":"JPY"}"#))
                .unwrap();
        assert_eq!(args.raw()["currency_to"], "JPY");
    }

    #[test]
    fn empty_string_is_empty_object() {
        let args = ToolArguments::from_call(&json!("  ")).unwrap();
        assert_eq!(args.raw(), &json!({}));
    }

    #[test]
    fn garbage_string_is_rejected() {
        let err = ToolArguments::from_call(&json!("USD to JPY")).unwrap_err();
        assert!(matches!(err, AgentError::InvalidArgument(_)));
    }

    #[test]
    fn objects_pass_through() {
        let args = ToolArguments::from_call(&json!({"currency_from": "EUR"})).unwrap();
        assert_eq!(args.raw(), &json!({"currency_from": "EUR"}));
    }
}
