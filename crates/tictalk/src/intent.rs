//! Intent classification over the oracle, with bounded retry.

use crate::oracle::{Message, Oracle};
use crate::prompts;
use crate::retry::RetryPolicy;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// Closed classification of a player utterance.
///
/// Parsed from (and displayed as) the lowercase literals `move`,
/// `discuss`, and `offtopic`. A classification failure is an error,
/// not a fourth variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// The player is making a move on the board.
    Move,
    /// The player is discussing the game or asking about the board.
    Discuss,
    /// The player is talking about something unrelated.
    OffTopic,
}

/// Intent classification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ClassifyError {
    /// No recognized intent within the retry budget.
    #[display("no recognized intent after {attempts} attempts")]
    Exhausted {
        /// Number of oracle calls made before giving up.
        attempts: u32,
    },
}

/// Classifies free-text utterances into an [`Intent`] via the oracle.
///
/// The oracle is unreliable rather than malicious: replies are accepted
/// only on an exact match against the three literals, and mismatches
/// are retried under the policy bound. Exhaustion is a non-fatal,
/// user-visible condition; the caller re-prompts instead of guessing.
pub struct IntentClassifier {
    oracle: Arc<dyn Oracle>,
    policy: RetryPolicy,
}

impl IntentClassifier {
    /// Creates a classifier over the given oracle and retry policy.
    pub fn new(oracle: Arc<dyn Oracle>, policy: RetryPolicy) -> Self {
        Self { oracle, policy }
    }

    /// Resolves the intent behind the utterance.
    #[instrument(skip(self, utterance), fields(max_attempts = self.policy.max_attempts()))]
    pub async fn classify(&self, utterance: &str) -> Result<Intent, ClassifyError> {
        let prompt = prompts::intent_prompt(utterance);
        let max_attempts = self.policy.max_attempts();

        for attempt in 1..=max_attempts {
            match self.oracle.complete(vec![Message::user(prompt.clone())]).await {
                Ok(reply) => {
                    let normalized = normalize(&reply);
                    debug!(reply = %normalized, attempt, "Classifier reply");
                    match normalized.parse::<Intent>() {
                        Ok(intent) => {
                            debug!(?intent, attempt, "Intent resolved");
                            return Ok(intent);
                        }
                        Err(_) => {
                            warn!(
                                reply = %normalized,
                                attempt,
                                max_attempts,
                                "Invalid intent reply from oracle, retrying"
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

        error!(attempts = max_attempts, "All classification retries failed");
        Err(ClassifyError::Exhausted {
            attempts: max_attempts,
        })
    }
}

/// Normalizes an oracle reply for exact-match comparison: trims
/// whitespace, strips surrounding quote characters, lowercases.
fn normalize(reply: &str) -> String {
    reply
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .trim()
        .to_lowercase()
}
