//! History consistency invariant: the snapshots agree with the live game.

use super::Invariant;
use crate::session::Session;
use crate::types::Board;

/// Invariant: the history starts empty, ends at the live board, holds one
/// snapshot per move plus the start, and the cursor points inside it.
pub struct HistoryConsistentInvariant;

impl Invariant<Session> for HistoryConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let history = session.history();
        history.boards().first() == Some(&Board::new())
            && history.live() == session.board()
            && history.len() == session.moves().len() + 1
            && history.cursor() < history.len()
    }

    fn description() -> &'static str {
        "History runs from the empty board to the live board, one entry per move"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Move, Session};

    #[test]
    fn test_holds_while_reviewing() {
        let mut session = Session::default();
        session.apply_move(Move::new(2, 2)).unwrap();
        session.seek(Direction::Previous);
        assert!(HistoryConsistentInvariant::holds(&session));
    }
}
