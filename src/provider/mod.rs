//! Model provider trait and the Chat Completions implementation.

pub mod format;
pub mod http;

#[cfg(feature = "openai")]
pub mod openai;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::models::capabilities::ModelCapabilities;
use crate::types::{
    message::AgentToolCall, FinishReason, GenerationSettings, ModelMessage, ResponseFormat, Usage,
};

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
    pub response_format: Option<ResponseFormat>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Capabilities of the model.
    fn capabilities(&self) -> &ModelCapabilities;

    /// Generate a single (non-streaming) completion.
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, AgentError>;
}

/// Create the OpenAI provider for the configured model.
///
/// Fails with [`AgentError::MissingApiKey`] when no `OPENAI_API_KEY` is set.
#[cfg(feature = "openai")]
pub fn create_provider(
    config: &crate::config::AgentConfig,
) -> Result<Box<dyn ModelProvider>, AgentError> {
    let api_key = config.require_api_key("openai")?;
    Ok(Box::new(openai::OpenAiProvider::new(
        config.model(),
        api_key,
        config.get_base_url("openai"),
    )))
}
