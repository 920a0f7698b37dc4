//! Structured output: constrain the final model answer to a JSON schema.

use crate::models::capabilities::ModelCapabilities;
use crate::types::*;

/// Named JSON Schema the final answer must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

/// Configure `settings`/`messages` so the model answers with `output`.
///
/// Uses the provider's JSON Schema response format when supported, JSON mode
/// plus an instruction otherwise, and a bare instruction as the last resort.
/// Any instruction is inserted right after a leading system message so the
/// agent's own instructions stay first.
pub fn prepare_structured_output(
    capabilities: &ModelCapabilities,
    settings: &mut GenerationSettings,
    messages: &mut Vec<ModelMessage>,
    output: &OutputSchema,
) {
    let instruction = if capabilities.supports_json_schema {
        settings.response_format = Some(ResponseFormat::JsonSchema {
            schema: output.schema.clone(),
            name: output.name.clone(),
        });
        return;
    } else if capabilities.supports_json_mode {
        settings.response_format = Some(ResponseFormat::JsonObject);
        "You must respond with valid JSON matching this schema"
    } else {
        "You must respond with ONLY valid JSON (no markdown, no explanation) matching this schema"
    };

    let schema_text = serde_json::to_string_pretty(&output.schema).unwrap_or_default();
    let message = ModelMessage::system(format!("{instruction}:\n```json\n{schema_text}\n```"));
    let at = match messages.first() {
        Some(first) if first.role == Role::System => 1,
        _ => 0,
    };
    messages.insert(at, message);
}

/// Strip markdown code fences from a JSON response.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let without_opening = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_opening
        .strip_suffix("```")
        .unwrap_or(without_opening)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> OutputSchema {
        OutputSchema {
            name: "ResponseFormat".into(),
            schema: json!({"type": "object"}),
        }
    }

    #[test]
    fn strip_code_fences_plain_json() {
        assert_eq!(strip_code_fences(r#"{"key": "value"}"#), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_code_fences_with_json_fence() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_code_fences_with_bare_fence() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn json_schema_capable_models_get_response_format_only() {
        let mut settings = GenerationSettings::default();
        let mut messages = vec![ModelMessage::system("sys"), ModelMessage::user("hi")];

        prepare_structured_output(
            &ModelCapabilities::full(128_000),
            &mut settings,
            &mut messages,
            &schema(),
        );

        assert!(matches!(
            settings.response_format,
            Some(ResponseFormat::JsonSchema { ref name, .. }) if name == "ResponseFormat"
        ));
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn json_mode_models_get_instruction_after_system_prompt() {
        let caps = ModelCapabilities {
            supports_json_mode: true,
            ..Default::default()
        };
        let mut settings = GenerationSettings::default();
        let mut messages = vec![ModelMessage::system("sys"), ModelMessage::user("hi")];

        prepare_structured_output(&caps, &mut settings, &mut messages, &schema());

        assert_eq!(settings.response_format, Some(ResponseFormat::JsonObject));
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].text_content(), "sys");
        assert!(messages[1].text_content().contains("valid JSON"));
    }
}
