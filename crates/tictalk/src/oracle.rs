//! Oracle boundary: role-tagged messages and the streaming completion trait.

use async_trait::async_trait;
use derive_more::{Display, Error};
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::pin::Pin;
use tracing::{error, instrument};

/// Role tag for a message sent to the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction.
    System,
    /// End-user content.
    User,
    /// Prior oracle output.
    Assistant,
}

/// A role-tagged text message.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// The role tag.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A lazy, finite, non-restartable sequence of reply fragments.
///
/// Concatenating the fragments in emission order yields the full reply.
pub type OracleStream = Pin<Box<dyn Stream<Item = Result<String, OracleError>> + Send>>;

/// An opaque, non-deterministic text-completion capability.
///
/// The core treats model identity and configuration as fixed; replies
/// are at-least-sometimes-wrong and every consumer validates them.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Sends the messages and returns the reply as a fragment stream.
    async fn stream(&self, messages: Vec<Message>) -> Result<OracleStream, OracleError>;

    /// Sends the messages and assembles the full reply.
    async fn complete(&self, messages: Vec<Message>) -> Result<String, OracleError> {
        let mut stream = self.stream(messages).await?;
        let mut reply = String::new();
        while let Some(fragment) = stream.next().await {
            reply.push_str(&fragment?);
        }
        Ok(reply)
    }
}

/// Oracle transport or parse error.
#[derive(Debug, Clone, Display, Error)]
#[display("oracle error: {} at {}:{}", message, file, line)]
pub struct OracleError {
    /// Error message.
    pub message: String,
    /// Line number where the error was created.
    pub line: u32,
    /// Source file where the error was created.
    pub file: &'static str,
}

impl OracleError {
    /// Creates a new oracle error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "oracle error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
