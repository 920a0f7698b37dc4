//! The currency agent: one conversation turn per `invoke`.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::classify::{classify, TaskStatusResult};
use super::response::StructuredResponse;
use super::session::{Session, SessionPolicy, SessionStore};
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::runtime::{AgentDefinition, AgentRuntime};
use crate::tools::{ExchangeRateClient, ExchangeRateTool, Tool};
use crate::types::ModelMessage;

/// Content types accepted and produced by the agent.
pub const SUPPORTED_CONTENT_TYPES: [&str; 2] = ["text", "text/plain"];

pub const AGENT_NAME: &str = "OpenAI currency converter agent";

pub const SYSTEM_INSTRUCTION: &str = "You are a specialized assistant for currency conversions. \
Your sole purpose is to use the 'get_exchange_rate' tool to answer questions about currency exchange rates. \
If the user asks about anything other than currency conversion or exchange rates, \
politely state that you cannot help with that topic and can only assist with currency-related queries. \
Do not attempt to answer unrelated questions or use tools for other purposes. \
Set response status to input_required if the user needs to provide more information. \
Set response status to error if there is an error while processing the request. \
Set response status to completed if the request is complete.";

/// Reply used when the model answered outside the response schema.
pub const RESPONSE_ERROR_MESSAGE: &str = "Response error";
/// Reply used when the runtime failed.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

/// Currency conversion agent with per-session history.
pub struct CurrencyAgent {
    definition: AgentDefinition,
    runtime: Arc<dyn AgentRuntime>,
    sessions: SessionStore,
}

impl CurrencyAgent {
    /// Agent using the public exchange-rate API and an unbounded session store.
    pub fn new(runtime: Arc<dyn AgentRuntime>) -> Self {
        Self {
            definition: Self::definition(ExchangeRateClient::default()),
            runtime,
            sessions: SessionStore::new(),
        }
    }

    /// Build the agent from configuration, backed by the OpenAI provider.
    #[cfg(feature = "openai")]
    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let provider = crate::provider::create_provider(config)?;
        let runtime = Arc::new(crate::runtime::ProviderRuntime::new(Arc::from(provider)));
        Ok(Self::new(runtime)
            .with_exchange_client(ExchangeRateClient::new(config.get_base_url("exchange-rate")))
            .with_session_policy(config.session_policy().clone()))
    }

    pub fn with_exchange_client(mut self, client: ExchangeRateClient) -> Self {
        self.definition = Self::definition(client);
        self
    }

    /// Replace the session store with an empty one governed by `policy`.
    pub fn with_session_policy(mut self, policy: SessionPolicy) -> Self {
        self.sessions = SessionStore::with_policy(policy);
        self
    }

    fn definition(client: ExchangeRateClient) -> AgentDefinition {
        let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(ExchangeRateTool::new(client))];
        AgentDefinition::builder()
            .name(AGENT_NAME)
            .instructions(SYSTEM_INSTRUCTION)
            .tools(tools)
            .output_schema(StructuredResponse::output_schema())
            .build()
    }

    pub fn agent_definition(&self) -> &AgentDefinition {
        &self.definition
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Run one user turn in `session_id` and classify the outcome.
    ///
    /// Never fails: runtime and schema problems come back as an `error`
    /// response. Turns on the same session id run one at a time.
    pub async fn invoke(&self, query: &str, session_id: &str) -> TaskStatusResult {
        let handle = self.sessions.get_or_create(session_id);
        let mut session = handle.lock().await;

        session.messages.push(ModelMessage::user(query));
        let response = self.query(&mut session).await;
        let result = classify(Some(&response));
        session.latest_response = Some(response);

        info!(
            session_id,
            is_task_complete = result.is_task_complete,
            require_user_input = result.require_user_input,
            "turn finished"
        );
        result
    }

    async fn query(&self, session: &mut Session) -> StructuredResponse {
        let output = match self.runtime.run(&self.definition, &session.messages).await {
            Ok(output) => output,
            Err(e) => {
                error!(error = %e, "runtime failed; session history left unchanged");
                return StructuredResponse::error(INTERNAL_ERROR_MESSAGE);
            }
        };

        let response = StructuredResponse::parse(&output.final_output).unwrap_or_else(|e| {
            warn!(error = %e, output = %output.final_output, "agent did not return structured output");
            StructuredResponse::error(RESPONSE_ERROR_MESSAGE)
        });
        session.messages = output.messages;
        response
    }
}
