//! Currency exchange agent.
//!
//! A conversational agent that answers exchange-rate questions. Each turn
//! appends the user's message to a per-session history, lets a model call the
//! `get_exchange_rate` tool, and classifies the model's structured reply into
//! a task state (`is_task_complete`, `require_user_input`, `content`).
//!
//! # Quick Start
//!
//! ```no_run
//! use currency_agent::prelude::*;
//!
//! # async fn example() -> currency_agent::error::Result<()> {
//! let config = AgentConfig::from_env();
//! let agent = CurrencyAgent::from_config(&config)?;
//! let reply = agent.invoke("How much is 100 USD in JPY?", "session-1").await;
//! println!("{}", reply.content);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod generation;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod runtime;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
