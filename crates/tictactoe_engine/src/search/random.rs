//! Uniform random move selection.

use super::ensure_playable;
use crate::action::Move;
use crate::error::GameError;
use crate::types::Board;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::instrument;

/// Picks uniformly among the empty squares.
///
/// # Errors
///
/// Returns [`GameError::InvalidState`] if the board is full or already won.
#[instrument(skip(board, rng))]
pub fn random_legal_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<Move, GameError> {
    ensure_playable(board)?;
    board
        .legal_moves()
        .choose(rng)
        .copied()
        .ok_or_else(|| GameError::InvalidState("no empty squares to choose from".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn test_only_picks_empty_squares() {
        let board: Board = "XOX/O.X/.O.".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mv = random_legal_move(&board, &mut rng).unwrap();
            assert!(board.is_empty(mv), "picked occupied {mv}");
        }
    }

    #[test]
    fn test_roughly_uniform_on_empty_board() {
        let board = Board::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<Move, usize> = HashMap::new();
        for _ in 0..9000 {
            *counts
                .entry(random_legal_move(&board, &mut rng).unwrap())
                .or_default() += 1;
        }
        assert_eq!(counts.len(), 9);
        for (mv, count) in counts {
            assert!((800..=1200).contains(&count), "{mv} picked {count} times");
        }
    }

    #[test]
    fn test_full_board_is_invalid_state() {
        let board: Board = "XOX/OXX/OXO".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            random_legal_move(&board, &mut rng),
            Err(GameError::InvalidState(_))
        ));
    }
}
