//! Agent card advertised to A2A clients.
//!
//! Only the data is defined here; publishing it (the `/.well-known` route,
//! push-notification keys) belongs to the hosting server.

use serde::{Deserialize, Serialize};

use super::currency::SUPPORTED_CONTENT_TYPES;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 10101;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    pub streaming: bool,
    pub push_notifications: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub version: String,
    pub default_input_modes: Vec<String>,
    pub default_output_modes: Vec<String>,
    pub capabilities: AgentCapabilities,
    pub skills: Vec<AgentSkill>,
}

impl AgentCard {
    /// Card for the currency agent served at `http://{host}:{port}/`.
    pub fn currency_agent(host: &str, port: u16) -> Self {
        let modes: Vec<String> = SUPPORTED_CONTENT_TYPES.iter().map(|m| m.to_string()).collect();
        Self {
            name: "OpenAI Currency Agent".to_string(),
            description: "Helps with exchange rates for currencies".to_string(),
            url: format!("http://{host}:{port}/"),
            version: env!("CARGO_PKG_VERSION").to_string(),
            default_input_modes: modes.clone(),
            default_output_modes: modes,
            capabilities: AgentCapabilities {
                streaming: false,
                push_notifications: true,
            },
            skills: vec![AgentSkill {
                id: "openai_agents_convert_currency".to_string(),
                name: "Currency Exchange Rates Tool".to_string(),
                description: "Helps with exchange values between various currencies".to_string(),
                tags: vec!["currency conversion".to_string(), "currency exchange".to_string()],
                examples: vec!["What is exchange rate between USD and CAD?".to_string()],
            }],
        }
    }
}
