//! Tool system for function calling.

pub mod arguments;
pub mod exchange_rate;
pub mod tool;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use exchange_rate::{ExchangeRateClient, ExchangeRateResult, ExchangeRateTool};
pub use tool::{Tool, ToolExecutionContext};
pub use types::AgentToolParameters;
