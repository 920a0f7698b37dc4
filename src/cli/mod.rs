//! Command-line interface for the currency agent.

use clap::{Parser, Subcommand};

use crate::agent::card::{DEFAULT_HOST, DEFAULT_PORT};
use crate::tools::exchange_rate::LATEST;

/// Currency exchange agent CLI
#[derive(Parser, Debug)]
#[command(name = "currency-agent", version, about = "Currency exchange agent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a single question and print the task status as JSON
    Ask(AskArgs),
    /// Interactive conversation in one session
    Chat(ChatArgs),
    /// Look up an exchange rate directly, without the model
    Rate(RateArgs),
    /// Print the agent card
    Card(CardArgs),
}

/// Arguments for `currency-agent ask`.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Session id to continue (a fresh one is generated when omitted)
    #[arg(short, long)]
    pub session: Option<String>,

    /// The question
    pub prompt: String,
}

/// Arguments for `currency-agent chat`.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Session id to use for the whole conversation
    #[arg(short, long)]
    pub session: Option<String>,
}

/// Arguments for `currency-agent rate`.
#[derive(Parser, Debug)]
pub struct RateArgs {
    /// Currency to convert from (e.g. USD)
    pub from: String,

    /// Currency to convert to (e.g. JPY)
    pub to: String,

    /// ISO date (YYYY-MM-DD) or "latest"
    #[arg(short, long, default_value = LATEST)]
    pub date: String,
}

/// Arguments for `currency-agent card`.
#[derive(Parser, Debug)]
pub struct CardArgs {
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

/// Install the `tracing` subscriber; `RUST_LOG` overrides the default level.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("currency_agent=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
