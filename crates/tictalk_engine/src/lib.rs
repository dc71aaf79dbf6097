//! Pure tic-tac-toe game logic.
//!
//! This crate owns the authoritative board state and everything derived
//! from it: move validation, the transition function, winner and draw
//! rules, and the serializable [`Snapshot`] view handed to callers.
//! It knows nothing about oracles, prompts, or I/O.

#![warn(missing_docs)]

mod error;
mod game;
mod rules;
mod snapshot;
mod types;

pub use error::MoveError;
pub use game::{Game, GameStatus, Move};
pub use snapshot::Snapshot;
pub use types::{Board, Player, Square};
