//! Move selection for the automated opponent.
//!
//! Both selectors are pure with respect to the board: they read a
//! snapshot and return coordinates, and the session applies them.

mod minimax;
mod random;

pub use minimax::{LOSS_SCORE, WIN_SCORE, DRAW_SCORE, best_move, score_moves};
pub use random::random_legal_move;

use crate::action::Move;
use crate::error::GameError;
use crate::rules::evaluate;
use crate::types::{Board, Difficulty, Player};
use rand::Rng;
use tracing::{debug, instrument};

/// Picks a move for `player` at the given difficulty.
#[instrument(skip(board, rng))]
pub fn choose_move<R: Rng + ?Sized>(
    difficulty: Difficulty,
    board: &Board,
    player: Player,
    rng: &mut R,
) -> Result<Move, GameError> {
    let mv = match difficulty {
        Difficulty::Random => random_legal_move(board, rng)?,
        Difficulty::Optimal => best_move(board, player)?,
    };
    debug!(%mv, "Selected move");
    Ok(mv)
}

/// Fails unless the board still has a game to play.
fn ensure_playable(board: &Board) -> Result<(), GameError> {
    let status = evaluate(board);
    if status.is_over() {
        return Err(GameError::InvalidState(format!(
            "no move to search for, game already decided ({status})"
        )));
    }
    Ok(())
}
