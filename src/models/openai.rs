//! OpenAI model definitions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::capabilities::ModelCapabilities;

/// OpenAI chat models usable by the agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
pub enum OpenAiModel {
    #[strum(serialize = "gpt-4o")]
    Gpt4o,
    #[strum(serialize = "gpt-4o-mini")]
    Gpt4oMini,
    /// Snapshot the currency agent was tuned against.
    #[strum(serialize = "gpt-4o-mini-2024-07-18")]
    Gpt4oMini20240718,
    #[strum(serialize = "gpt-4-turbo")]
    Gpt4Turbo,
    #[strum(serialize = "gpt-4")]
    Gpt4,
    #[strum(serialize = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[strum(serialize = "o1-mini")]
    O1Mini,
    #[strum(serialize = "gpt-4.1")]
    Gpt41,
    #[strum(serialize = "gpt-4.1-mini")]
    Gpt41Mini,
    /// Custom/unknown OpenAI model by ID.
    #[strum(default)]
    Custom(String),
}

impl Default for OpenAiModel {
    fn default() -> Self {
        Self::Gpt4oMini20240718
    }
}

impl OpenAiModel {
    /// Get the API model identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt4oMini20240718 => "gpt-4o-mini-2024-07-18",
            Self::Gpt4Turbo => "gpt-4-turbo",
            Self::Gpt4 => "gpt-4",
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::O1Mini => "o1-mini",
            Self::Gpt41 => "gpt-4.1",
            Self::Gpt41Mini => "gpt-4.1-mini",
            Self::Custom(s) => s,
        }
    }

    pub fn capabilities(&self) -> ModelCapabilities {
        let (ctx, tools, json_schema) = match self {
            Self::Gpt4o | Self::Gpt4oMini | Self::Gpt4oMini20240718 => (128_000, true, true),
            Self::Gpt4Turbo => (128_000, true, true),
            Self::Gpt4 => (8_192, true, false),
            Self::Gpt35Turbo => (16_385, true, false),
            Self::O1Mini => (128_000, false, false),
            Self::Gpt41 | Self::Gpt41Mini => (1_000_000, true, true),
            Self::Custom(_) => (128_000, true, true),
        };
        ModelCapabilities {
            supports_tools: tools,
            supports_json_mode: !matches!(self, Self::O1Mini),
            supports_json_schema: json_schema,
            supports_system_messages: !matches!(self, Self::O1Mini),
            context_length: ctx,
            max_output_tokens: Some(16_384),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_and_custom_ids() {
        let known: OpenAiModel = "gpt-4o-mini-2024-07-18".parse().unwrap();
        assert_eq!(known, OpenAiModel::Gpt4oMini20240718);

        let custom: OpenAiModel = "my-finetune".parse().unwrap();
        assert_eq!(custom.as_str(), "my-finetune");
    }

    #[test]
    fn default_model_supports_tools_and_json_schema() {
        let caps = OpenAiModel::default().capabilities();
        assert!(caps.supports_tools);
        assert!(caps.supports_json_schema);
    }
}
