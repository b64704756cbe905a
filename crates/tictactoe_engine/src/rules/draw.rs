//! Draw detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::types::Board;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A draw is a full board without a complete line.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}
