//! Command-line interface for tictalk.

use clap::Parser;

/// Tictalk - conversational tic-tac-toe against an LLM oracle
#[derive(Parser, Debug)]
#[command(name = "tictalk")]
#[command(about = "Conversational tic-tac-toe console", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Play in manual mode (two human players, no oracle)
    #[arg(long)]
    pub manual: bool,

    /// Path to the oracle configuration file
    #[arg(long, default_value = "tictalk.toml")]
    pub config: std::path::PathBuf,
}
