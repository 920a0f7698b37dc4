//! Text generation with tool loop.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::provider::{ModelProvider, ProviderRequest, ToolDefinition};
use crate::tools::arguments::ToolArguments;
use crate::tools::tool::{Tool, ToolExecutionContext};
use crate::tools::validation::validate_arguments;
use crate::types::*;

/// Maximum tool loop iterations to prevent infinite loops.
pub const MAX_TOOL_ITERATIONS: usize = 20;

/// Generate text with an optional tool loop.
///
/// Tool calls returned by the model are executed and fed back until the
/// model produces a final text response or the iteration limit is hit. The
/// returned `messages` hold the whole conversation, including every tool call
/// and tool result and the final assistant message.
pub async fn generate_text(
    provider: &dyn ModelProvider,
    mut messages: Vec<ModelMessage>,
    settings: GenerationSettings,
    tools: &[Arc<dyn Tool>],
) -> Result<GenerateTextResult, AgentError> {
    let tool_defs: Option<Vec<ToolDefinition>> = if tools.is_empty() {
        None
    } else {
        Some(
            tools
                .iter()
                .map(|t| ToolDefinition {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.parameters().schema.clone(),
                })
                .collect(),
        )
    };

    let mut steps = Vec::new();
    let mut total_usage = Usage::default();

    for iteration in 0..MAX_TOOL_ITERATIONS {
        let request = ProviderRequest {
            messages: messages.clone(),
            settings: settings.clone(),
            tools: tool_defs.clone(),
            response_format: settings.response_format.clone(),
        };

        debug!(iteration, provider = provider.provider_name(), "generate_text: calling provider");
        let response = provider.generate_text(&request).await?;
        total_usage.merge(&response.usage);

        let mut step = GenerationStep {
            text: response.text.clone(),
            tool_calls: response.tool_calls.clone(),
            tool_results: Vec::new(),
            usage: response.usage.clone(),
            finish_reason: response.finish_reason,
        };

        if response.tool_calls.is_empty() {
            messages.push(ModelMessage::assistant(response.text.clone()));
            steps.push(step);
            return Ok(GenerateTextResult {
                text: response.text,
                steps,
                messages,
                usage: total_usage,
                finish_reason: response.finish_reason,
            });
        }

        messages.push(ModelMessage::assistant_tool_calls(
            &response.text,
            &response.tool_calls,
        ));

        for tc in &response.tool_calls {
            let result = execute_tool_call(tools, tc).await;
            messages.push(ModelMessage::tool_result(
                result.tool_call_id.clone(),
                result.result.clone(),
                result.is_error,
            ));
            step.tool_results.push(result);
        }
        steps.push(step);
    }

    warn!(limit = MAX_TOOL_ITERATIONS, "tool loop hit iteration limit");
    let last_text = steps.last().map(|s| s.text.clone()).unwrap_or_default();
    Ok(GenerateTextResult {
        text: last_text,
        steps,
        messages,
        usage: total_usage,
        finish_reason: Some(FinishReason::Length),
    })
}

async fn execute_tool_call(tools: &[Arc<dyn Tool>], tc: &AgentToolCall) -> AgentToolResult {
    let error_result = |message: String| AgentToolResult {
        tool_call_id: tc.id.clone(),
        result: json!({ "error": message }),
        is_error: true,
    };

    let Some(tool) = tools.iter().find(|t| t.name() == tc.name) else {
        warn!(tool = %tc.name, "Tool not found");
        return error_result(format!("Tool '{}' not found", tc.name));
    };

    let args = match ToolArguments::from_call(&tc.arguments) {
        Ok(args) => args,
        Err(e) => {
            warn!(tool = %tc.name, error = %e, "Tool arguments undecodable");
            return error_result(e.to_string());
        }
    };
    if let Err(message) = validate_arguments(args.raw(), &tool.parameters().schema) {
        warn!(tool = %tc.name, %message, "Tool arguments rejected");
        return error_result(message);
    }

    let ctx = ToolExecutionContext {
        tool_call_id: Some(tc.id.clone()),
    };
    match tool.execute(&args, &ctx).await {
        Ok(result) => AgentToolResult {
            tool_call_id: tc.id.clone(),
            result,
            is_error: false,
        },
        Err(e) => {
            let err = AgentError::ToolExecution {
                tool_name: tc.name.clone(),
                message: e.to_string(),
            };
            warn!(error = %err, "Tool execution failed");
            error_result(err.to_string())
        }
    }
}
