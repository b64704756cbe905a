//! Moves: board coordinates and the record of who played them.

use crate::error::{GameError, IllegalMoveReason, ParseMoveError};
use crate::types::{Player, SIZE};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A `(row, col)` coordinate on the board.
///
/// Construction is unchecked; [`Move::in_bounds`] tells whether both
/// coordinates fall in `0..=2`. The session rejects anything else with
/// [`GameError::IllegalMove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

const LABELS: [&str; SIZE * SIZE] = [
    "Top-left",
    "Top-center",
    "Top-right",
    "Middle-left",
    "Center",
    "Middle-right",
    "Bottom-left",
    "Bottom-center",
    "Bottom-right",
];

impl Move {
    /// All 9 squares in row-major order.
    pub const ALL: [Move; SIZE * SIZE] = [
        Move::new(0, 0),
        Move::new(0, 1),
        Move::new(0, 2),
        Move::new(1, 0),
        Move::new(1, 1),
        Move::new(1, 2),
        Move::new(2, 0),
        Move::new(2, 1),
        Move::new(2, 2),
    ];

    /// Creates a move at the given coordinates.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when both coordinates lie on the 3x3 board.
    pub fn in_bounds(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// Row-major index (0-8), if on the board.
    pub fn to_index(self) -> Option<usize> {
        self.in_bounds().then_some(self.row * SIZE + self.col)
    }

    /// Creates a move from a row-major index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable name of the square ("Center", "Top-left", ...).
    pub fn label(self) -> Option<&'static str> {
        self.to_index().map(|i| LABELS[i])
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl TryFrom<(i64, i64)> for Move {
    type Error = GameError;

    /// Converts signed coordinates, rejecting anything off the board.
    fn try_from((row, col): (i64, i64)) -> Result<Self, Self::Error> {
        let on_board = |v: i64| (0..SIZE as i64).contains(&v);
        if on_board(row) && on_board(col) {
            Ok(Move::new(row as usize, col as usize))
        } else {
            Err(GameError::IllegalMove {
                row,
                col,
                reason: IllegalMoveReason::OutOfBounds,
            })
        }
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts `"r c"`, `"r,c"`, a single row-major index `0-8`, or a square
    /// label such as `"center"` or `"top left"`.
    ///
    /// Numeric coordinates are parsed but not range-checked; the session
    /// reports out-of-range squares as illegal moves.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        match parts.as_slice() {
            [row, col] => {
                if let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>()) {
                    return Ok(Move::new(row, col));
                }
            }
            [single] => {
                if let Ok(index) = single.parse::<usize>() {
                    return Move::from_index(index).ok_or_else(|| ParseMoveError::new(s));
                }
            }
            _ => {}
        }

        let wanted: String = trimmed
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        LABELS
            .iter()
            .position(|label| {
                label
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect::<String>()
                    .to_lowercase()
                    == wanted
            })
            .and_then(Move::from_index)
            .ok_or_else(|| ParseMoveError::new(s))
    }
}

/// A move together with the player who made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Played {
    /// The player making the move.
    pub player: Player,
    /// Where the mark was placed.
    pub mv: Move,
}

impl std::fmt::Display for Played {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        assert_eq!(Move::new(0, 0).to_index(), Some(0));
        assert_eq!(Move::new(1, 1).to_index(), Some(4));
        assert_eq!(Move::new(2, 2).to_index(), Some(8));
        assert_eq!(Move::new(3, 0).to_index(), None);
        assert_eq!(Move::from_index(5), Some(Move::new(1, 2)));
        assert_eq!(Move::from_index(9), None);
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!("1 2".parse::<Move>().unwrap(), Move::new(1, 2));
        assert_eq!(" 2,0 ".parse::<Move>().unwrap(), Move::new(2, 0));
        assert_eq!("3 0".parse::<Move>().unwrap(), Move::new(3, 0));
        assert!("-1 0".parse::<Move>().is_err());
    }

    #[test]
    fn test_parse_index_and_label() {
        assert_eq!("4".parse::<Move>().unwrap(), Move::new(1, 1));
        assert_eq!("center".parse::<Move>().unwrap(), Move::new(1, 1));
        assert_eq!("Top left".parse::<Move>().unwrap(), Move::new(0, 0));
        assert_eq!("bottom-right".parse::<Move>().unwrap(), Move::new(2, 2));
        assert!("9".parse::<Move>().is_err());
        assert!("middle".parse::<Move>().is_err());
    }

    #[test]
    fn test_try_from_signed() {
        assert_eq!(Move::try_from((2, 1)).unwrap(), Move::new(2, 1));
        assert!(matches!(
            Move::try_from((-1, 0)),
            Err(GameError::IllegalMove {
                reason: IllegalMoveReason::OutOfBounds,
                ..
            })
        ));
        assert!(Move::try_from((0, 3)).is_err());
    }
}
