//! Immutable result snapshots of the board.

use crate::error::MoveError;
use crate::types::{Board, Player, Square};
use serde::Serialize;

/// Immutable, serializable view of the board plus the outcome of the
/// most recent move attempt.
///
/// The three position lists partition 1-9: they are pairwise disjoint
/// and their union covers every position. An empty `error` means the
/// most recent move (if any) was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Positions occupied by X (1-9, sorted).
    #[serde(rename = "X")]
    x: Vec<u8>,
    /// Positions occupied by O (1-9, sorted).
    #[serde(rename = "O")]
    o: Vec<u8>,
    /// Unoccupied positions (1-9, sorted).
    empty: Vec<u8>,
    /// The winner, if any line is complete.
    winner: Option<Player>,
    /// Rejection reason for the last move attempt, or empty.
    error: String,
}

impl Snapshot {
    pub(crate) fn of(board: &Board) -> Self {
        Self::with_error(board, String::new())
    }

    pub(crate) fn rejected(board: &Board, error: MoveError) -> Self {
        Self::with_error(board, error.to_string())
    }

    fn with_error(board: &Board, error: String) -> Self {
        let mut x = Vec::new();
        let mut o = Vec::new();
        let mut empty = Vec::new();
        for (index, square) in board.squares().iter().enumerate() {
            let position = index as u8 + 1;
            match square {
                Square::Occupied(Player::X) => x.push(position),
                Square::Occupied(Player::O) => o.push(position),
                Square::Empty => empty.push(position),
            }
        }
        Self {
            x,
            o,
            empty,
            winner: board.winner(),
            error,
        }
    }

    /// Positions occupied by X.
    pub fn x(&self) -> &[u8] {
        &self.x
    }

    /// Positions occupied by O.
    pub fn o(&self) -> &[u8] {
        &self.o
    }

    /// Unoccupied positions.
    pub fn empty(&self) -> &[u8] {
        &self.empty
    }

    /// The winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Rejection reason for the last move attempt, or empty.
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Whether the last move attempt was accepted.
    pub fn accepted(&self) -> bool {
        self.error.is_empty()
    }

    /// Serializes the snapshot to JSON for embedding in prompts.
    ///
    /// Infallible: the snapshot is a flat struct of integer lists and
    /// strings, which always serializes.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("snapshot is always serializable")
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their position digit; occupied cells show the
    /// player's mark.
    pub fn render(&self) -> String {
        let mut board = String::new();
        for row in 0..3 {
            let cells: Vec<String> = (0..3)
                .map(|col| {
                    let position = (row * 3 + col + 1) as u8;
                    if self.x.contains(&position) {
                        "X".to_string()
                    } else if self.o.contains(&position) {
                        "O".to_string()
                    } else {
                        position.to_string()
                    }
                })
                .collect();
            board.push_str(&cells.join(" | "));
            board.push('\n');
            if row < 2 {
                board.push_str(&"-".repeat(10));
                board.push('\n');
            }
        }
        board
    }
}
