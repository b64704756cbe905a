//! Core domain types for tic-tac-toe.

use crate::action::Move;
use crate::error::ParseBoardError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Side length of the board.
pub const SIZE: usize = 3;

/// Player in the game.
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
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (goes first unless configured otherwise).
    X,
    /// Player O (the automated opponent by default).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Single-character mark used when rendering a board.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }

    fn symbol(self) -> char {
        self.player().map_or('.', Player::symbol)
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are plain values: [`Board::with`] returns a new board and leaves
/// the original untouched, so snapshots kept in a history never alias the
/// live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [[Square; SIZE]; SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from rows of squares.
    pub fn from_rows(squares: [[Square; SIZE]; SIZE]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given move, or `None` if it is off the board.
    pub fn get(&self, mv: Move) -> Option<Square> {
        self.squares.get(mv.row)?.get(mv.col).copied()
    }

    /// Checks if the square at `mv` is on the board and empty.
    pub fn is_empty(&self, mv: Move) -> bool {
        matches!(self.get(mv), Some(Square::Empty))
    }

    /// Returns a copy of this board with `square` written at `mv`.
    ///
    /// The caller is responsible for `mv` being in bounds.
    pub fn with(mut self, mv: Move, square: Square) -> Self {
        self.set(mv, square);
        self
    }

    /// Writes in place. Only the search scratch board and [`Board::with`] use this.
    pub(crate) fn set(&mut self, mv: Move, square: Square) {
        self.squares[mv.row][mv.col] = square;
    }

    /// Returns the rows of the board.
    pub fn rows(&self) -> &[[Square; SIZE]; SIZE] {
        &self.squares
    }

    /// Flattens the board into row-major order.
    pub fn cells(&self) -> [Square; SIZE * SIZE] {
        let mut cells = [Square::Empty; SIZE * SIZE];
        for (slot, square) in cells.iter_mut().zip(self.squares.iter().flatten()) {
            *slot = *square;
        }
        cells
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().flatten().all(|s| *s != Square::Empty)
    }

    /// Lists the empty squares in row-major order.
    #[instrument(skip(self))]
    pub fn legal_moves(&self) -> Vec<Move> {
        Move::ALL
            .iter()
            .copied()
            .filter(|mv| self.is_empty(*mv))
            .collect()
    }

    /// Counts the marks a player has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Counts occupied squares.
    pub fn filled(&self) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|s| **s != Square::Empty)
            .count()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.squares.iter().enumerate() {
            for (c, square) in row.iter().enumerate() {
                write!(f, "{}", square.symbol())?;
                if c < SIZE - 1 {
                    write!(f, "|")?;
                }
            }
            if r < SIZE - 1 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine squares (`X`, `O`, and `.` or `_` for empty), ignoring
    /// whitespace and the `|`, `/`, `-`, `+` separators, so the `Display`
    /// output parses back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        for ch in s.chars() {
            let square = match ch {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '.' | '_' => Square::Empty,
                '|' | '/' | '-' | '+' => continue,
                c if c.is_whitespace() => continue,
                other => {
                    return Err(ParseBoardError::new(format!(
                        "unexpected character {other:?}"
                    )));
                }
            };
            cells.push(square);
        }

        if cells.len() != SIZE * SIZE {
            return Err(ParseBoardError::new(format!(
                "expected {} squares, found {}",
                SIZE * SIZE,
                cells.len()
            )));
        }

        let mut board = Board::new();
        for (mv, square) in Move::ALL.iter().zip(cells) {
            board.set(*mv, square);
        }
        Ok(board)
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win along `line`.
    Win {
        /// The winning player.
        player: Player,
        /// The three squares of the winning line, in enumeration order.
        line: [Move; SIZE],
    },
    /// Every square is filled and nobody won.
    Draw,
}

impl GameStatus {
    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Win { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn winning_line(&self) -> Option<&[Move; SIZE]> {
        match self {
            GameStatus::Win { line, .. } => Some(line),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Win { player, .. } => write!(f, "Player {player} wins"),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}

/// Strength of the automated opponent.
///
/// `easy` and `hard` are accepted as aliases for `random` and `optimal`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random legal move.
    #[default]
    #[serde(alias = "easy")]
    #[strum(to_string = "random", serialize = "easy")]
    Random,
    /// Exhaustive minimax.
    #[serde(alias = "hard")]
    #[strum(to_string = "optimal", serialize = "hard")]
    Optimal,
}
