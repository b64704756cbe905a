//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so that the session and the search share one definition
//! of "won" and "drawn".

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, winning_line};

use crate::types::{Board, GameStatus};
use tracing::instrument;

/// Derives the status of a board.
///
/// Win lines are checked before fullness, so a move that completes a line
/// on the last empty square is a win, not a draw.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some((player, line)) = winning_line(board) {
        return GameStatus::Win { player, line };
    }

    if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
