//! Convenience re-exports for common use.

pub use crate::agent::{
    classify, AgentCard, CurrencyAgent, ResponseStatus, SessionPolicy, StructuredResponse,
    TaskStatusResult,
};
pub use crate::config::AgentConfig;
pub use crate::error::{AgentError, Result};
pub use crate::provider::ModelProvider;
pub use crate::runtime::{AgentDefinition, AgentRuntime, ProviderRuntime, RunOutput};
pub use crate::tools::{ExchangeRateClient, ExchangeRateResult, ExchangeRateTool, Tool};
pub use crate::types::{ModelMessage, Role};
