//! Winner and draw rules.

use crate::types::{Board, Player, Square};

/// The eight winning lines: 3 rows, 3 columns, 2 diagonals (0-based indices).
pub(crate) const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

impl Board {
    /// Checks for a winner on the board.
    ///
    /// Returns the first line whose three cells are equal and occupied.
    /// Under correct alternation at most one winner can exist.
    pub fn winner(&self) -> Option<Player> {
        for [a, b, c] in LINES {
            if let Some(Square::Occupied(player)) = self.get(a) {
                if self.get(b) == self.get(a) && self.get(c) == self.get(a) {
                    return Some(player);
                }
            }
        }
        None
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        self.squares().iter().all(|s| *s != Square::Empty)
    }
}
