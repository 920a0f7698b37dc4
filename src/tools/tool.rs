//! The trait every model-callable tool implements.

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::types::AgentToolParameters;
use crate::error::AgentError;

/// Per-call context handed to [`Tool::execute`].
#[derive(Debug, Clone, Default)]
pub struct ToolExecutionContext {
    /// Id of the tool call being served, when driven by the model.
    pub tool_call_id: Option<String>,
}

/// A function the model may call during a turn.
///
/// Implementations report domain failures (a remote API being down, a
/// malformed payload) as `Ok` JSON so the model can react to them; `Err` is
/// reserved for calls the tool cannot even interpret.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model calls the tool by.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments.
    fn parameters(&self) -> &AgentToolParameters;

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<serde_json::Value, AgentError>;
}
