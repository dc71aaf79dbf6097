//! Prompt construction for the oracle.

use crate::intent::Intent;
use tictalk_engine::Snapshot;

/// Fixed framing shared by every prompt.
pub const AGENT_CONTEXT: &str = "You are a tic tac toe agent. \
The human player goes first and plays as X. You are playing as O.";

const WINNING_LINES: &str = r#"{"X": [1, 2, 3]}, {"X": [4, 5, 6]}, {"X": [7, 8, 9]}, {"X": [1, 4, 7]}, {"X": [2, 5, 8]}, {"X": [3, 6, 9]}, {"X": [1, 5, 9]}, {"X": [3, 5, 7]}"#;

/// Instruction prompt for intent classification.
///
/// Requests a single-word answer naming one of the three intents; the
/// classifier accepts nothing else.
pub fn intent_prompt(utterance: &str) -> String {
    format!(
        "{AGENT_CONTEXT}\n\n\
         Given the prompt below, determine the player's intended outcome. \
         There are three possible intents:\n\n\
         1. \"{}\": The player is making a move on the board. If it is a single number, \
         that is the intended move square. Questions are not considered moves. \
         Selecting a square or moving to a square is considered a move.\n\
         2. \"{}\": The player is discussing the game or asking questions. These include \
         questions about where to move next or the current board state.\n\
         3. \"{}\": The player is discussing something unrelated to the game.\n\n\
         prompt: {utterance}\n\n\
         Determine which one of these applies and provide a one word answer.",
        Intent::Move,
        Intent::Discuss,
        Intent::OffTopic,
    )
}

/// Rules-and-board framing embedded in game-related prompts.
pub fn rules_prompt(snapshot: &Snapshot) -> String {
    format!(
        "{AGENT_CONTEXT} The board has values 1 to 9.\n\n\
         The possible winning conditions are:\n\n\
         {WINNING_LINES}\n\n\
         The board is represented as follows:\n\
         {}",
        snapshot.to_json()
    )
}

/// Prompt asking the oracle to translate the utterance into a single
/// structured move picked from the empty-position set.
pub fn move_prompt(snapshot: &Snapshot, utterance: &str) -> String {
    format!(
        "{}\n\n\
         The player prompt was: {utterance}\n\n\
         You can only pick from the \"empty\" list of the current board. \
         What is the move?\n\n\
         Return the move as JSON with no markdown. For example, to move \
         to position 1, return {{\"move\": 1}}.",
        rules_prompt(snapshot)
    )
}

/// Prompt asking the oracle to render the board and respond to game
/// discussion in context.
pub fn discuss_prompt(snapshot: &Snapshot, utterance: &str) -> String {
    format!(
        "{}\n\n\
         The player prompt was: {utterance}\n\n\
         Draw the board for the player then focus on the game rules and \
         the current board state. What is your response?\n\n\
         For reference, the board currently looks like:\n{}",
        rules_prompt(snapshot),
        snapshot.render()
    )
}

/// Prompt asking the oracle to concisely explain why the utterance is
/// unrelated to the game.
pub fn offtopic_prompt(utterance: &str) -> String {
    format!(
        "The player prompt was: {utterance}\n\n\
         Explain concisely why this prompt is off-topic."
    )
}
