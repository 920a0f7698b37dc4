//! Runtime seam between the agent wrapper and whatever drives the model.
//!
//! [`AgentRuntime`] takes an agent definition plus the session history and
//! returns the final output text together with the full post-turn history.
//! [`ProviderRuntime`] is the built-in implementation backed by a
//! [`ModelProvider`] and the tool loop in [`crate::generation::text`].

use std::sync::Arc;

use async_trait::async_trait;
use bon::Builder;
use tracing::debug;

use crate::error::AgentError;
use crate::generation::{generate_text, prepare_structured_output, OutputSchema};
use crate::provider::ModelProvider;
use crate::tools::Tool;
use crate::types::{GenerationSettings, ModelMessage, Role, Usage};

/// Fixed configuration of one agent: instructions, tools and output schema.
#[derive(Clone, Builder)]
pub struct AgentDefinition {
    #[builder(into)]
    pub name: String,
    #[builder(into)]
    pub instructions: String,
    #[builder(default)]
    pub tools: Vec<Arc<dyn Tool>>,
    pub output_schema: Option<OutputSchema>,
    #[builder(default)]
    pub settings: GenerationSettings,
}

impl std::fmt::Debug for AgentDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentDefinition")
            .field("name", &self.name)
            .field(
                "tools",
                &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("output_schema", &self.output_schema.as_ref().map(|s| &s.name))
            .finish()
    }
}

/// Result of one runtime turn.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Raw text of the final answer (JSON when an output schema is set).
    pub final_output: String,
    /// Full conversation after the turn, without the agent's instructions.
    pub messages: Vec<ModelMessage>,
    pub usage: Usage,
}

/// Drives a model through one agent turn.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn run(
        &self,
        agent: &AgentDefinition,
        history: &[ModelMessage],
    ) -> Result<RunOutput, AgentError>;
}

/// [`AgentRuntime`] backed by a single model provider.
pub struct ProviderRuntime {
    provider: Arc<dyn ModelProvider>,
}

impl ProviderRuntime {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn ModelProvider> {
        &self.provider
    }
}

#[async_trait]
impl AgentRuntime for ProviderRuntime {
    async fn run(
        &self,
        agent: &AgentDefinition,
        history: &[ModelMessage],
    ) -> Result<RunOutput, AgentError> {
        let capabilities = self.provider.capabilities();
        if !agent.tools.is_empty() && !capabilities.supports_tools {
            return Err(AgentError::Configuration(format!(
                "model '{}' does not support tool calling",
                self.provider.model_id()
            )));
        }

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ModelMessage::system(agent.instructions.clone()));
        messages.extend(history.iter().cloned());

        let mut settings = agent.settings.clone();
        if let Some(ref output) = agent.output_schema {
            prepare_structured_output(capabilities, &mut settings, &mut messages, output);
        }
        let preamble = messages.len() - history.len();

        debug!(agent = %agent.name, history = history.len(), "running agent turn");
        let result = generate_text(self.provider.as_ref(), messages, settings, &agent.tools).await?;

        let messages = result
            .messages
            .into_iter()
            .enumerate()
            .filter(|(i, m)| !(*i < preamble && m.role == Role::System))
            .map(|(_, m)| m)
            .collect();

        Ok(RunOutput {
            final_output: result.text,
            messages,
            usage: result.usage,
        })
    }
}
