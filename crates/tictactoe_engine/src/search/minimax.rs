//! Exhaustive minimax over the full game tree.
//!
//! Scores are from the perspective of the player being optimized for.
//! Terminal scores are shifted by search depth so that a quicker win
//! outranks a slower one and a slower loss outranks a quicker one.

use super::ensure_playable;
use crate::action::Move;
use crate::error::GameError;
use crate::rules::{is_full, winning_line};
use crate::types::{Board, Player, Square};
use tracing::{debug, instrument};

/// Base score of a win for the optimizing player.
pub const WIN_SCORE: i32 = 10;
/// Base score of a loss for the optimizing player.
pub const LOSS_SCORE: i32 = -10;
/// Score of a drawn board.
pub const DRAW_SCORE: i32 = 0;

/// Returns the best move for `player`.
///
/// Ties go to the first move in row-major order. The input board is
/// never modified; the search works on a private copy.
///
/// # Errors
///
/// Returns [`GameError::InvalidState`] if the board is full or already won.
#[instrument(skip(board), fields(filled = board.filled()))]
pub fn best_move(board: &Board, player: Player) -> Result<Move, GameError> {
    let scored = score_moves(board, player)?;

    let mut best: Option<(Move, i32)> = None;
    for (mv, score) in scored {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((mv, score));
        }
    }

    let (mv, score) = best.ok_or_else(|| {
        GameError::InvalidState("no empty squares to choose from".to_string())
    })?;
    debug!(%mv, score, "Minimax best move");
    Ok(mv)
}

/// Scores every legal move for `player`, in row-major order.
///
/// # Errors
///
/// Returns [`GameError::InvalidState`] if the board is full or already won.
#[instrument(skip(board))]
pub fn score_moves(board: &Board, player: Player) -> Result<Vec<(Move, i32)>, GameError> {
    ensure_playable(board)?;

    let mut scratch = *board;
    let mut scored = Vec::with_capacity(9);
    for mv in Move::ALL {
        if !scratch.is_empty(mv) {
            continue;
        }
        scratch.set(mv, Square::Occupied(player));
        let score = minimax(&mut scratch, player.opponent(), player, 1);
        scratch.set(mv, Square::Empty);
        scored.push((mv, score));
    }
    debug_assert_eq!(&scratch, board);

    Ok(scored)
}

/// Scores a finished board, or returns `None` while play continues.
fn terminal_score(board: &Board, optimizer: Player, depth: i32) -> Option<i32> {
    if let Some((winner, _)) = winning_line(board) {
        return Some(if winner == optimizer {
            WIN_SCORE - depth
        } else {
            LOSS_SCORE + depth
        });
    }
    is_full(board).then_some(DRAW_SCORE)
}

/// Value of `board` with `to_move` to play. Every placement is undone
/// before returning, so `board` comes back unchanged.
fn minimax(board: &mut Board, to_move: Player, optimizer: Player, depth: i32) -> i32 {
    if let Some(score) = terminal_score(board, optimizer, depth) {
        return score;
    }

    let maximizing = to_move == optimizer;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for mv in Move::ALL {
        if !board.is_empty(mv) {
            continue;
        }
        board.set(mv, Square::Occupied(to_move));
        let score = minimax(board, to_move.opponent(), optimizer, depth + 1);
        board.set(mv, Square::Empty);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}
