//! Response routing: one strategy per resolved intent.

use crate::intent::Intent;
use crate::oracle::{Message, Oracle, OracleError, OracleStream};
use crate::prompts;
use crate::retry::RetryPolicy;
use derive_more::{Display, Error, From};
use serde::Deserialize;
use std::sync::Arc;
use tictalk_engine::Snapshot;
use tracing::{debug, instrument, warn};

/// Outcome of routing an utterance.
pub enum Reply {
    /// A structured move proposal (position 1-9). The caller must push
    /// it through the move validator like any human move.
    Move(u8),
    /// Free text for display, streamed fragment by fragment.
    Text(OracleStream),
}

/// Routing failure.
#[derive(Debug, Display, Error, From)]
pub enum RouteError {
    /// The oracle never produced a parseable move within the retry budget.
    #[display("no usable move proposal after {attempts} attempts")]
    #[from(ignore)]
    MoveExhausted {
        /// Number of oracle calls made before giving up.
        attempts: u32,
    },
    /// Transport failure while opening a free-text reply stream.
    Oracle(OracleError),
}

/// Structured move reply requested from the oracle.
#[derive(Debug, Deserialize)]
struct MoveReply {
    #[serde(rename = "move")]
    position: u8,
}

/// Dispatches a classified utterance to exactly one response strategy.
pub struct ResponseRouter {
    oracle: Arc<dyn Oracle>,
    policy: RetryPolicy,
}

impl ResponseRouter {
    /// Creates a router over the given oracle and retry policy.
    pub fn new(oracle: Arc<dyn Oracle>, policy: RetryPolicy) -> Self {
        Self { oracle, policy }
    }

    /// Routes the utterance according to its resolved intent.
    ///
    /// `Move` produces a validated-later position; `Discuss` and
    /// `OffTopic` produce free-text streams and never mutate state.
    #[instrument(skip(self, utterance, snapshot))]
    pub async fn respond(
        &self,
        intent: Intent,
        utterance: &str,
        snapshot: &Snapshot,
    ) -> Result<Reply, RouteError> {
        match intent {
            Intent::Move => self.propose_move(utterance, snapshot).await.map(Reply::Move),
            Intent::Discuss => {
                let prompt = prompts::discuss_prompt(snapshot, utterance);
                debug!(prompt_length = prompt.len(), "Discussion prompt");
                let stream = self.oracle.stream(vec![Message::user(prompt)]).await?;
                Ok(Reply::Text(stream))
            }
            Intent::OffTopic => {
                let prompt = prompts::offtopic_prompt(utterance);
                debug!(prompt_length = prompt.len(), "Off-topic prompt");
                let stream = self.oracle.stream(vec![Message::user(prompt)]).await?;
                Ok(Reply::Text(stream))
            }
        }
    }

    /// Asks the oracle for a structured move, retrying on malformed
    /// replies under the same policy as intent classification.
    ///
    /// The proposal is parsed here but validated by the game engine;
    /// the oracle is not trusted to self-validate.
    #[instrument(skip(self, utterance, snapshot), fields(max_attempts = self.policy.max_attempts()))]
    async fn propose_move(&self, utterance: &str, snapshot: &Snapshot) -> Result<u8, RouteError> {
        let prompt = prompts::move_prompt(snapshot, utterance);
        let max_attempts = self.policy.max_attempts();

        for attempt in 1..=max_attempts {
            match self.oracle.complete(vec![Message::user(prompt.clone())]).await {
                Ok(reply) => {
                    debug!(reply = %reply, attempt, "Move reply");
                    match parse_move_reply(&reply) {
                        Ok(position) => {
                            debug!(position, attempt, "Move proposal parsed");
                            return Ok(position);
                        }
                        Err(e) => {
                            warn!(
                                reply = %reply,
                                error = %e,
                                attempt,
                                max_attempts,
                                "Malformed move reply, retrying"
                            );
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, attempt, max_attempts, "Oracle call failed, retrying");
                }
            }
            if attempt < max_attempts {
                self.policy.pause().await;
            }
        }

        Err(RouteError::MoveExhausted {
            attempts: max_attempts,
        })
    }
}

/// Parses a `{"move": N}` reply, tolerating surrounding prose or
/// markdown fences by extracting the outermost JSON object.
fn parse_move_reply(reply: &str) -> Result<u8, serde_json::Error> {
    let trimmed = reply.trim();
    let json = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    };
    serde_json::from_str::<MoveReply>(json).map(|reply| reply.position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        assert_eq!(parse_move_reply(r#"{"move": 5}"#).unwrap(), 5);
    }

    #[test]
    fn parses_fenced_json() {
        assert_eq!(parse_move_reply("```json\n{\"move\": 3}\n```").unwrap(), 3);
    }

    #[test]
    fn parses_json_with_prose() {
        assert_eq!(
            parse_move_reply("I will take the center: {\"move\": 5} as discussed").unwrap(),
            5
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_move_reply("five, probably").is_err());
        assert!(parse_move_reply(r#"{"position": 5}"#).is_err());
    }
}
