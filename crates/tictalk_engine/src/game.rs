//! Game state and the move transition function.

use crate::error::MoveError;
use crate::snapshot::Snapshot;
use crate::types::{Board, Player, Square};
use tracing::{debug, instrument, warn};

/// A proposed move: which player, and which position (1-9, row-major).
///
/// Constructed per attempt and consumed by [`Game::play`]; the range is
/// validated there rather than encoded in the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct Move {
    /// The player making the move.
    player: Player,
    /// Target position, 1-indexed.
    position: u8,
}

impl Move {
    /// The player making the move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Target position (1-9).
    pub fn position(&self) -> u8 {
        self.position
    }
}

/// Current status of the game, derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

/// The authoritative game state: board occupancy plus a turn counter.
///
/// `turn % 2` selects the expected mover, with the fixed alternation
/// X, O, X, O, ... Only [`Game::play`] mutates the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: u32,
}

impl Game {
    /// Creates a new game with an empty board; X moves first.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: 0,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the number of moves applied so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns the player expected to move next.
    pub fn expected_player(&self) -> Player {
        if self.turn % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Validates a move without applying it.
    ///
    /// Checks short-circuit in order: turn ownership, position range,
    /// cell occupancy.
    pub fn validate(&self, mv: Move) -> Result<(), MoveError> {
        if mv.player() != self.expected_player() {
            return Err(MoveError::NotYourTurn);
        }
        if !(1..=9).contains(&mv.position()) {
            return Err(MoveError::OutOfRange(mv.position()));
        }
        if !self.board.is_empty(usize::from(mv.position()) - 1) {
            return Err(MoveError::Occupied(mv.position()));
        }
        Ok(())
    }

    /// Applies a move if legal and returns a snapshot of the result.
    ///
    /// On success the target cell is set, the turn counter increments,
    /// and the snapshot reflects the new state with an empty error.
    /// On failure the state is unchanged and the snapshot reflects the
    /// unchanged state with the specific rejection reason; it is still
    /// fully valid and renderable.
    #[instrument(skip(self), fields(player = %mv.player(), position = mv.position(), turn = self.turn))]
    pub fn play(&mut self, mv: Move) -> Snapshot {
        if let Err(error) = self.validate(mv) {
            warn!(%error, "move rejected");
            return Snapshot::rejected(&self.board, error);
        }
        self.board
            .set(usize::from(mv.position()) - 1, Square::Occupied(mv.player()));
        self.turn += 1;
        debug!(turn = self.turn, "move applied");
        Snapshot::of(&self.board)
    }

    /// Returns a snapshot of the current state with no error.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.board)
    }

    /// Derives the game status from the board.
    pub fn status(&self) -> GameStatus {
        if let Some(winner) = self.board.winner() {
            GameStatus::Won(winner)
        } else if self.board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
