//! Alternating turn invariant: players alternate from the first mover.

use super::Invariant;
use crate::session::Session;

/// Invariant: the first recorded move belongs to the configured first
/// player, moves alternate, and the player to move is the one after the
/// last recorded move.
pub struct AlternatingTurnInvariant;

impl Invariant<Session> for AlternatingTurnInvariant {
    fn holds(session: &Session) -> bool {
        let first = *session.options().first_player();
        let moves = session.moves();

        let alternates = moves
            .iter()
            .enumerate()
            .all(|(i, played)| {
                let expected = if i % 2 == 0 { first } else { first.opponent() };
                played.player == expected
            });

        let expected_next = if moves.len() % 2 == 0 {
            first
        } else {
            first.opponent()
        };

        alternates && session.to_move() == expected_next
    }

    fn description() -> &'static str {
        "Players alternate turns starting with the first mover"
    }
}
