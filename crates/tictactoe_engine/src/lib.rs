//! Tic-tac-toe engine: board, rules, opponent search, and game sessions.
//!
//! # Architecture
//!
//! - **Board**: `Copy` 3x3 grid; every change produces a new value
//! - **Rules**: [`evaluate`] turns a board into a [`GameStatus`]
//! - **Search**: [`best_move`] (exhaustive minimax) and
//!   [`random_legal_move`] (uniform over empty squares)
//! - **Session**: turn order, move application, and a [`History`] of boards
//!   that can be reviewed with [`Session::seek`] without touching the game
//!
//! Rendering, input handling, and any delay before showing the computer's
//! move belong to the caller.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Difficulty, GameStatus, Move, Session, SessionOptions};
//!
//! # fn main() -> Result<(), tictactoe_engine::GameError> {
//! let options = SessionOptions::default().with_difficulty(Difficulty::Optimal);
//! let mut session = Session::new(options);
//!
//! let status = session.apply_move(Move::new(1, 1))?;
//! assert_eq!(status, GameStatus::InProgress);
//!
//! if session.is_computer_turn() {
//!     session.apply_computer_move()?;
//! }
//! assert_eq!(session.history().len(), 3);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod error;
mod history;
pub mod invariants;
pub mod rules;
pub mod search;
mod session;
mod types;

pub use action::{Move, Played};
pub use error::{GameError, IllegalMoveReason, ParseBoardError, ParseMoveError};
pub use history::{Direction, History, Snapshot};
pub use rules::evaluate;
pub use search::{best_move, choose_move, random_legal_move};
pub use session::{Session, SessionOptions};
pub use types::{Board, Difficulty, GameStatus, Player, SIZE, Square};

/// Alias for clarity when a player is used as the mark on a square.
pub type Mark = Player;
