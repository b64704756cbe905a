//! Monotonic board invariant: each snapshot adds exactly one mark.

use super::Invariant;
use crate::session::Session;
use crate::types::Square;

/// Invariant: consecutive snapshots differ in exactly one square, which
/// goes from empty to the mark of the player recorded for that move.
pub struct MonotonicBoardInvariant;

impl Invariant<Session> for MonotonicBoardInvariant {
    fn holds(session: &Session) -> bool {
        let boards = session.history().boards();
        boards
            .windows(2)
            .zip(session.moves())
            .all(|(pair, played)| {
                let (before, after) = (pair[0].cells(), pair[1].cells());
                let changed: Vec<usize> = (0..before.len())
                    .filter(|i| before[*i] != after[*i])
                    .collect();
                changed.len() == 1
                    && played.mv.to_index() == Some(changed[0])
                    && before[changed[0]] == Square::Empty
                    && after[changed[0]] == Square::Occupied(played.player)
            })
    }

    fn description() -> &'static str {
        "Each move fills exactly one previously empty square"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Session};

    #[test]
    fn test_holds_after_computer_reply() {
        let mut session = Session::default();
        session.apply_move(Move::new(1, 1)).unwrap();
        session.apply_computer_move().unwrap();
        assert!(MonotonicBoardInvariant::holds(&session));
    }
}
