//! Shared test helpers: a scripted model provider and scripted runtimes.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use currency_agent::error::AgentError;
use currency_agent::models::capabilities::ModelCapabilities;
use currency_agent::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use currency_agent::runtime::{AgentDefinition, AgentRuntime, RunOutput};
use currency_agent::types::*;

/// A mock provider that returns canned responses and records requests.
pub struct MockProvider {
    model_id: String,
    capabilities: ModelCapabilities,
    responses: Mutex<VecDeque<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self::with_capabilities(model_id, ModelCapabilities::full(128_000))
    }

    pub fn with_capabilities(model_id: &str, capabilities: ModelCapabilities) -> Self {
        Self {
            model_id: model_id.to_string(),
            capabilities,
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a text response.
    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push_back(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            tool_calls: vec![],
            finish_reason: Some(FinishReason::Stop),
        });
    }

    /// Queue a tool call response.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) {
        self.responses.lock().unwrap().push_back(ProviderResponse {
            text: String::new(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
            tool_calls: vec![AgentToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: args,
            }],
            finish_reason: Some(FinishReason::ToolCalls),
        });
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, AgentError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AgentError::Runtime("mock provider exhausted".into()))
    }
}

/// Runtime that answers every turn with a fixed final output and appends an
/// assistant message to the history it was given.
pub struct ScriptedRuntime {
    final_output: String,
    calls: AtomicUsize,
}

impl ScriptedRuntime {
    pub fn new(final_output: &str) -> Self {
        Self {
            final_output: final_output.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn structured(status: &str, message: &str) -> Self {
        Self::new(&serde_json::json!({ "status": status, "message": message }).to_string())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentRuntime for ScriptedRuntime {
    async fn run(
        &self,
        _agent: &AgentDefinition,
        history: &[ModelMessage],
    ) -> Result<RunOutput, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut messages = history.to_vec();
        messages.push(ModelMessage::assistant(self.final_output.clone()));
        Ok(RunOutput {
            final_output: self.final_output.clone(),
            messages,
            usage: Usage::default(),
        })
    }
}

/// Runtime that always fails.
pub struct FailingRuntime;

#[async_trait]
impl AgentRuntime for FailingRuntime {
    async fn run(
        &self,
        _agent: &AgentDefinition,
        _history: &[ModelMessage],
    ) -> Result<RunOutput, AgentError> {
        Err(AgentError::api(503, "model overloaded"))
    }
}

/// Runtime that holds each turn open for a while and records the highest
/// number of turns seen in flight at once.
pub struct SlowRuntime {
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl SlowRuntime {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentRuntime for SlowRuntime {
    async fn run(
        &self,
        _agent: &AgentDefinition,
        history: &[ModelMessage],
    ) -> Result<RunOutput, AgentError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let output = format!(
            r#"{{"status":"completed","message":"saw {} messages"}}"#,
            history.len()
        );
        let mut messages = history.to_vec();
        messages.push(ModelMessage::assistant(output.clone()));
        Ok(RunOutput {
            final_output: output,
            messages,
            usage: Usage::default(),
        })
    }
}

/// Runtime that replaces the whole history with a condensed one (a summary
/// plus the latest user message) and remembers what it returned.
pub struct RewritingRuntime {
    final_output: String,
    returned: Mutex<Vec<ModelMessage>>,
}

impl RewritingRuntime {
    pub fn new(final_output: &str) -> Self {
        Self {
            final_output: final_output.to_string(),
            returned: Mutex::new(Vec::new()),
        }
    }

    pub fn returned(&self) -> Vec<ModelMessage> {
        self.returned.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentRuntime for RewritingRuntime {
    async fn run(
        &self,
        _agent: &AgentDefinition,
        history: &[ModelMessage],
    ) -> Result<RunOutput, AgentError> {
        let mut messages = vec![ModelMessage::assistant(format!(
            "summary of {} earlier messages",
            history.len() - 1
        ))];
        messages.extend(history.last().cloned());
        messages.push(ModelMessage::assistant(self.final_output.clone()));
        *self.returned.lock().unwrap() = messages.clone();
        Ok(RunOutput {
            final_output: self.final_output.clone(),
            messages,
            usage: Usage::default(),
        })
    }
}

/// Runtime that plays back a script: `Some(output)` succeeds with that output,
/// `None` fails.
pub struct SequenceRuntime {
    script: Mutex<VecDeque<Option<String>>>,
}

impl SequenceRuntime {
    pub fn new(script: Vec<Option<&str>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().map(|s| s.map(str::to_string)).collect()),
        }
    }
}

#[async_trait]
impl AgentRuntime for SequenceRuntime {
    async fn run(
        &self,
        _agent: &AgentDefinition,
        history: &[ModelMessage],
    ) -> Result<RunOutput, AgentError> {
        let step = self.script.lock().unwrap().pop_front().flatten();
        let Some(output) = step else {
            return Err(AgentError::Runtime("scripted failure".into()));
        };
        let mut messages = history.to_vec();
        messages.push(ModelMessage::assistant(output.clone()));
        Ok(RunOutput {
            final_output: output,
            messages,
            usage: Usage::default(),
        })
    }
}
