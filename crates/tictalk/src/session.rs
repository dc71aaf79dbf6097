//! Agent-mode session: one live game plus the classify-and-route layer.

use crate::intent::IntentClassifier;
use crate::oracle::{Oracle, OracleStream};
use crate::retry::RetryPolicy;
use crate::router::{Reply, ResponseRouter};
use std::sync::Arc;
use tictalk_engine::{Game, GameStatus, Move, Snapshot};
use tracing::{info, instrument, warn};

/// What the loop should do with the outcome of one turn.
pub enum TurnOutput {
    /// A move was accepted; render the new board.
    Board(Snapshot),
    /// A move was rejected; show the error, state unchanged.
    Rejected(Snapshot),
    /// Free text from the oracle; drain the stream to the console.
    Narration(OracleStream),
    /// The turn stalled (classification or move proposal exhausted,
    /// or an oracle failure); show the message and re-prompt.
    Retry(String),
    /// The game reached a terminal state.
    GameOver(GameStatus, Snapshot),
}

/// A single interactive game session.
///
/// Owns the only live [`Game`]; every mutation goes through
/// [`Session::handle`] on one logical thread, so no locking is needed.
pub struct Session {
    game: Game,
    classifier: IntentClassifier,
    router: ResponseRouter,
}

impl Session {
    /// Creates a session over the given oracle and retry policy.
    pub fn new(oracle: Arc<dyn Oracle>, policy: RetryPolicy) -> Self {
        Self {
            game: Game::new(),
            classifier: IntentClassifier::new(oracle.clone(), policy),
            router: ResponseRouter::new(oracle, policy),
        }
    }

    /// Snapshot of the current board with no error.
    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    /// Whether the game has reached a terminal state.
    pub fn is_over(&self) -> bool {
        !matches!(self.game.status(), GameStatus::InProgress)
    }

    /// Handles one player utterance: classify, route, and (for move
    /// intents) apply the proposed move through the validator.
    ///
    /// Never panics and never consumes a turn on failure; the worst
    /// outcome is a [`TurnOutput::Retry`] asking for a new utterance.
    #[instrument(skip(self, utterance))]
    pub async fn handle(&mut self, utterance: &str) -> TurnOutput {
        if self.is_over() {
            return TurnOutput::GameOver(self.game.status(), self.game.snapshot());
        }

        let intent = match self.classifier.classify(utterance).await {
            Ok(intent) => intent,
            Err(e) => {
                warn!(error = %e, "Classification failed, asking player to rephrase");
                return TurnOutput::Retry(format!(
                    "Sorry, I could not work out what you meant ({e}). Please try again."
                ));
            }
        };

        let snapshot = self.game.snapshot();
        match self.router.respond(intent, utterance, &snapshot).await {
            Ok(Reply::Move(position)) => {
                let player = self.game.expected_player();
                let result = self.game.play(Move::new(player, position));
                if !result.accepted() {
                    return TurnOutput::Rejected(result);
                }
                match self.game.status() {
                    GameStatus::InProgress => TurnOutput::Board(result),
                    status => {
                        info!(?status, "Game over");
                        TurnOutput::GameOver(status, result)
                    }
                }
            }
            Ok(Reply::Text(stream)) => TurnOutput::Narration(stream),
            Err(e) => {
                warn!(error = %e, "Routing failed");
                TurnOutput::Retry(
                    "The agent could not produce a response. Please try again.".to_string(),
                )
            }
        }
    }
}
