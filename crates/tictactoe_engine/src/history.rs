//! Board snapshots and the read-only cursor used to review them.

use crate::types::Board;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Direction to move the history cursor.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    /// One step back, stopping at the empty board.
    #[strum(to_string = "previous", serialize = "prev", serialize = "back")]
    Previous,
    /// One step forward, stopping at the live board.
    #[strum(to_string = "next", serialize = "forward")]
    Next,
}

/// The board shown at the cursor, with the cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Snapshot {
    /// The board at `index`.
    board: Board,
    /// Cursor position after the seek.
    index: usize,
    /// Number of snapshots in the history.
    len: usize,
}

impl Snapshot {
    /// True when the cursor rests on the empty starting board.
    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    /// True when the cursor rests on the live board.
    pub fn is_live(&self) -> bool {
        self.index + 1 == self.len
    }
}

/// Ordered, append-only list of boards with a review cursor.
///
/// Index 0 is always the empty board and the last entry is always the
/// live board. Moving the cursor never touches the entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    boards: Vec<Board>,
    cursor: usize,
}

impl History {
    /// Creates a history holding only the empty board.
    pub fn new() -> Self {
        Self {
            boards: vec![Board::new()],
            cursor: 0,
        }
    }

    /// Appends the board produced by an accepted move and moves the cursor
    /// to it.
    #[instrument(skip(self, board), fields(len = self.boards.len()))]
    pub fn push(&mut self, board: Board) {
        self.boards.push(board);
        self.cursor = self.boards.len() - 1;
    }

    /// Moves the cursor one step, clamping at both ends.
    #[instrument(skip(self), fields(cursor = self.cursor, len = self.boards.len()))]
    pub fn seek(&mut self, direction: Direction) -> Snapshot {
        self.cursor = match direction {
            Direction::Previous => self.cursor.saturating_sub(1),
            Direction::Next => (self.cursor + 1).min(self.last_index()),
        };
        debug!(cursor = self.cursor, "History cursor moved");
        self.snapshot()
    }

    /// The board under the cursor, without moving it.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.boards[self.cursor],
            index: self.cursor,
            len: self.boards.len(),
        }
    }

    /// The live board (last entry).
    pub fn live(&self) -> &Board {
        &self.boards[self.last_index()]
    }

    /// The board under the cursor.
    pub fn current(&self) -> &Board {
        &self.boards[self.cursor]
    }

    /// Cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All snapshots, oldest first.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Number of snapshots (moves played + 1).
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Always false: the empty board is never removed.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    fn last_index(&self) -> usize {
        self.boards.len() - 1
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Player, Square};

    fn history_with(moves: &[Move]) -> History {
        let mut history = History::new();
        let mut board = Board::new();
        let mut player = Player::X;
        for mv in moves {
            board = board.with(*mv, Square::Occupied(player));
            history.push(board);
            player = player.opponent();
        }
        history
    }

    #[test]
    fn test_new_history_has_empty_board() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.live(), &Board::new());
    }

    #[test]
    fn test_push_moves_cursor_to_tail() {
        let history = history_with(&[Move::new(1, 1), Move::new(0, 0)]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current(), history.live());
    }

    #[test]
    fn test_previous_clamps_at_zero() {
        let mut history = history_with(&[Move::new(1, 1)]);
        assert_eq!(history.seek(Direction::Previous).index(), &0);
        let snapshot = history.seek(Direction::Previous);
        assert_eq!(snapshot.index(), &0);
        assert!(snapshot.at_start());
        assert_eq!(snapshot.board(), &Board::new());
    }

    #[test]
    fn test_next_clamps_at_tail() {
        let mut history = history_with(&[Move::new(1, 1), Move::new(0, 0)]);
        history.seek(Direction::Previous);
        history.seek(Direction::Previous);
        assert_eq!(history.seek(Direction::Next).index(), &1);
        assert_eq!(history.seek(Direction::Next).index(), &2);
        let snapshot = history.seek(Direction::Next);
        assert_eq!(snapshot.index(), &2);
        assert!(snapshot.is_live());
    }

    #[test]
    fn test_seek_does_not_change_entries() {
        let mut history = history_with(&[Move::new(1, 1), Move::new(0, 0)]);
        let before = history.boards().to_vec();
        history.seek(Direction::Previous);
        history.seek(Direction::Next);
        history.seek(Direction::Previous);
        assert_eq!(history.boards(), before.as_slice());
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("prev".parse::<Direction>().unwrap(), Direction::Previous);
        assert_eq!("Next".parse::<Direction>().unwrap(), Direction::Next);
    }
}
