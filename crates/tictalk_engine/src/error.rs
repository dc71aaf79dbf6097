//! Move validation errors.

use derive_more::{Display, Error};

/// Errors that can occur when applying a move.
///
/// Validation short-circuits in declaration order: turn ownership is
/// checked before the position range, which is checked before cell
/// occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The move was made by the wrong player.
    #[display("not your turn")]
    NotYourTurn,
    /// The position is outside 1-9.
    #[display("position {_0} out of range")]
    OutOfRange(#[error(not(source))] u8),
    /// The target cell is already occupied.
    #[display("cell {_0} occupied")]
    Occupied(#[error(not(source))] u8),
}
