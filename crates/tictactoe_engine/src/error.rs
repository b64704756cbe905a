//! Error types for the engine.

use crate::types::GameStatus;
use derive_more::{Display, Error};
use tracing::instrument;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum IllegalMoveReason {
    /// A coordinate lies outside `0..=2`.
    #[display("square is off the board")]
    OutOfBounds,
    /// The square already holds a mark.
    #[display("square is already occupied")]
    Occupied,
}

/// Error that can occur when applying a move or asking for one.
///
/// Every variant is recoverable: the session is left exactly as it was
/// before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameError {
    /// The target square is occupied or off the board.
    #[display("Illegal move at ({row}, {col}): {reason}")]
    IllegalMove {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
        /// What made the move illegal.
        reason: IllegalMoveReason,
    },

    /// The game has already ended.
    #[display("Game is already over: {_0}")]
    GameOver(GameStatus),

    /// The requested operation does not apply to the current state.
    #[display("Invalid state: {_0}")]
    InvalidState(String),
}

impl std::error::Error for GameError {}

impl GameError {
    #[instrument]
    pub(crate) fn occupied(row: usize, col: usize) -> Self {
        GameError::IllegalMove {
            row: row as i64,
            col: col as i64,
            reason: IllegalMoveReason::Occupied,
        }
    }

    #[instrument]
    pub(crate) fn out_of_bounds(row: usize, col: usize) -> Self {
        GameError::IllegalMove {
            row: i64::try_from(row).unwrap_or(i64::MAX),
            col: i64::try_from(col).unwrap_or(i64::MAX),
            reason: IllegalMoveReason::OutOfBounds,
        }
    }
}

/// Failure to parse a square from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized square: {input:?}")]
pub struct ParseMoveError {
    /// The text that failed to parse.
    pub input: String,
}

impl ParseMoveError {
    /// Creates a new parse error for `input`.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Failure to parse a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board: {message}")]
pub struct ParseBoardError {
    /// What was wrong with the input.
    pub message: String,
}

impl ParseBoardError {
    /// Creates a new board parse error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
