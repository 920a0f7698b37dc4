//! Currency agent CLI binary entry point.

use std::io::Write;

use clap::Parser;
use currency_agent::agent::{AgentCard, CurrencyAgent};
use currency_agent::cli::{AskArgs, CardArgs, ChatArgs, Cli, Commands, RateArgs};
use currency_agent::config::AgentConfig;
use currency_agent::error::AgentError;
use currency_agent::tools::ExchangeRateClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

#[tokio::main]
async fn main() {
    currency_agent::cli::init_tracing();
    let cli = Cli::parse();
    let config = AgentConfig::from_env();

    let result = match cli.command {
        Commands::Ask(args) => handle_ask(&config, args).await,
        Commands::Chat(args) => handle_chat(&config, args).await,
        Commands::Rate(args) => handle_rate(&config, args).await,
        Commands::Card(args) => handle_card(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        std::process::exit(1);
    }
}

fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

async fn handle_ask(config: &AgentConfig, args: AskArgs) -> Result<(), AgentError> {
    let agent = CurrencyAgent::from_config(config)?;
    let session_id = args.session.unwrap_or_else(new_session_id);

    let result = agent.invoke(&args.prompt, &session_id).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn handle_chat(config: &AgentConfig, args: ChatArgs) -> Result<(), AgentError> {
    let agent = CurrencyAgent::from_config(config)?;
    let session_id = args.session.unwrap_or_else(new_session_id);
    eprintln!("session {session_id} (Ctrl-D to quit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| AgentError::Configuration(format!("failed to read stdin: {e}")))?
        else {
            break;
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let result = agent.invoke(query, &session_id).await;
        println!("{}", result.content);
        if result.is_task_complete {
            eprintln!("[completed]");
        } else if result.require_user_input {
            eprintln!("[input required]");
        }
    }

    println!();
    Ok(())
}

async fn handle_rate(config: &AgentConfig, args: RateArgs) -> Result<(), AgentError> {
    let client = ExchangeRateClient::new(config.get_base_url("exchange-rate"));
    let result = client
        .get_exchange_rate(&args.from, &args.to, &args.date)
        .await;
    let failed = result.is_failure();

    println!("{}", serde_json::to_string_pretty(&result.into_json())?);
    if failed {
        std::process::exit(2);
    }
    Ok(())
}

fn handle_card(args: CardArgs) -> Result<(), AgentError> {
    let card = AgentCard::currency_agent(&args.host, args.port);
    println!("{}", serde_json::to_string_pretty(&card)?);
    Ok(())
}
