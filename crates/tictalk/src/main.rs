//! Tictalk binary: conversational tic-tac-toe console.

use anyhow::Result;
use clap::Parser;
use tictalk::cli::Cli;
use tictalk::config::OracleConfig;
use tictalk::console;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.manual {
        info!("Starting tic-tac-toe in manual mode");
        println!("Starting Tic Tac Toe in manual mode.");
        console::run_manual_mode()
    } else {
        info!("Starting tic-tac-toe in agent mode");
        println!("Starting Tic Tac Toe in agent mode.");
        let config = load_config(&cli.config)?;
        let oracle = config.build_oracle()?;
        console::run_agent_mode(oracle, config.retry_policy()).await
    }
}

/// Loads the oracle config, falling back to defaults when the file is absent.
fn load_config(path: &std::path::Path) -> Result<OracleConfig> {
    if path.exists() {
        Ok(OracleConfig::from_file(path)?)
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
        Ok(OracleConfig::default())
    }
}
