//! Conversational tic-tac-toe console driven by an LLM oracle.
//!
//! The player types free text at a prompt; an intent classifier asks
//! the oracle what the utterance means (move, discussion, or off-topic
//! chatter) and a router dispatches to the matching response strategy.
//! Board-state transitions live in [`tictalk_engine`] and are the only
//! source of truth; the oracle is never trusted to validate its own
//! moves.

#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod config;
pub mod console;
pub mod intent;
pub mod oracle;
pub mod prompts;
pub mod retry;
pub mod router;
pub mod session;

pub use client::{OllamaClient, OpenAiClient, OracleProvider};
pub use config::{ConfigError, OracleConfig};
pub use intent::{ClassifyError, Intent, IntentClassifier};
pub use oracle::{Message, Oracle, OracleError, OracleStream, Role};
pub use retry::RetryPolicy;
pub use router::{Reply, ResponseRouter, RouteError};
pub use session::{Session, TurnOutput};
