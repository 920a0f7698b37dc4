//! Results returned by the generation loop.

use serde::{Deserialize, Serialize};

use super::generation::FinishReason;
use super::message::{AgentToolCall, AgentToolResult, ModelMessage};
use super::usage::Usage;

/// One provider round-trip inside the tool loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStep {
    pub text: String,
    pub tool_calls: Vec<AgentToolCall>,
    pub tool_results: Vec<AgentToolResult>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Final result of a text generation with tool loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTextResult {
    /// Text of the final assistant turn.
    pub text: String,
    pub steps: Vec<GenerationStep>,
    /// Full conversation after the run, including tool calls, tool results
    /// and the final assistant message.
    pub messages: Vec<ModelMessage>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}
