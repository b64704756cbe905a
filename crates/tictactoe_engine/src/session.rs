//! A single game: turn order, move application, and history.

use crate::action::{Move, Played};
use crate::error::GameError;
use crate::history::{Direction, History, Snapshot};
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::rules::evaluate;
use crate::search::choose_move;
use crate::types::{Board, Difficulty, GameStatus, Player, Square};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Settings fixed when a session is created.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct SessionOptions {
    /// Who moves first.
    first_player: Player,
    /// Which player the computer controls, if any.
    computer_player: Option<Player>,
    /// Strength of the computer player.
    difficulty: Difficulty,
    /// Seed for the random difficulty. `None` seeds from the OS.
    seed: Option<u64>,
}

impl Default for SessionOptions {
    /// X moves first; the computer plays O at random difficulty.
    fn default() -> Self {
        Self {
            first_player: Player::X,
            computer_player: Some(Player::O),
            difficulty: Difficulty::default(),
            seed: None,
        }
    }
}

/// One interactive game.
///
/// The session owns the live board and its history. Every accepted move
/// writes a new board, appends it to the history, and flips the player to
/// move; rejected moves leave everything as it was. A host that shares a
/// session across threads must serialize access itself.
#[derive(Debug, Clone)]
pub struct Session {
    options: SessionOptions,
    board: Board,
    to_move: Player,
    status: GameStatus,
    history: History,
    moves: Vec<Played>,
    rng: StdRng,
}

impl Session {
    /// Creates a new session with an empty board.
    #[instrument]
    pub fn new(options: SessionOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(
            first_player = %options.first_player,
            computer = ?options.computer_player,
            difficulty = %options.difficulty,
            "Starting new session"
        );
        Self {
            options,
            board: Board::new(),
            to_move: options.first_player,
            status: GameStatus::InProgress,
            history: History::new(),
            moves: Vec::new(),
            rng,
        }
    }

    /// Rebuilds a session by applying `moves` in order.
    ///
    /// # Errors
    ///
    /// Fails with the first error any move produces.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(options: SessionOptions, moves: &[Move]) -> Result<Self, GameError> {
        let mut session = Self::new(options);
        for mv in moves {
            session.apply_move(*mv)?;
        }
        Ok(session)
    }

    /// Places the mark of the player to move at `mv`.
    ///
    /// Returns the status after the move.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameOver`] if the game has already ended.
    /// - [`GameError::IllegalMove`] if `mv` is off the board or occupied.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn apply_move(&mut self, mv: Move) -> Result<GameStatus, GameError> {
        if self.status.is_over() {
            warn!(status = %self.status, "Move attempted after game ended");
            return Err(GameError::GameOver(self.status));
        }

        if !mv.in_bounds() {
            warn!(%mv, "Move off the board");
            return Err(GameError::out_of_bounds(mv.row, mv.col));
        }

        if !self.board.is_empty(mv) {
            warn!(%mv, "Square already occupied");
            return Err(GameError::occupied(mv.row, mv.col));
        }

        let player = self.to_move;
        let board = self.board.with(mv, Square::Occupied(player));
        let status = evaluate(&board);

        self.board = board;
        self.history.push(board);
        self.moves.push(Played::new(player, mv));
        self.to_move = player.opponent();
        self.status = status;

        debug_assert!(
            SessionInvariants::check_all(self).is_ok(),
            "session invariants violated after {player} played {mv}"
        );

        info!(%player, %mv, %status, "Move applied");
        Ok(status)
    }

    /// Lets the computer choose and play a move for the player to move.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameOver`] if the game has already ended.
    /// - [`GameError::InvalidState`] if no computer player is configured or
    ///   it is not the computer's turn.
    #[instrument(skip(self), fields(difficulty = %self.options.difficulty))]
    pub fn apply_computer_move(&mut self) -> Result<GameStatus, GameError> {
        if self.status.is_over() {
            warn!(status = %self.status, "Computer move requested after game ended");
            return Err(GameError::GameOver(self.status));
        }

        let computer = self.options.computer_player.ok_or_else(|| {
            GameError::InvalidState("no computer player in this session".to_string())
        })?;

        if computer != self.to_move {
            warn!(%computer, to_move = %self.to_move, "Computer asked to move out of turn");
            return Err(GameError::InvalidState(format!(
                "it is {}'s turn, the computer plays {computer}",
                self.to_move
            )));
        }

        let mv = choose_move(self.options.difficulty, &self.board, computer, &mut self.rng)?;
        debug!(%mv, "Computer chose move");
        self.apply_move(mv)
    }

    /// Moves the history cursor. Never changes the live board or the turn.
    #[instrument(skip(self))]
    pub fn seek(&mut self, direction: Direction) -> Snapshot {
        self.history.seek(direction)
    }

    /// The board under the history cursor.
    pub fn snapshot(&self) -> Snapshot {
        self.history.snapshot()
    }

    /// Discards this game and starts a fresh one with the same settings,
    /// optionally switching difficulty. The random stream carries over.
    pub fn restart(mut self, difficulty: Option<Difficulty>) -> Session {
        self.reset(difficulty);
        self
    }

    /// In-place form of [`Session::restart`].
    #[instrument(skip(self), fields(moves = self.moves.len()))]
    pub fn reset(&mut self, difficulty: Option<Difficulty>) {
        if let Some(difficulty) = difficulty {
            self.options.difficulty = difficulty;
        }
        info!(difficulty = %self.options.difficulty, "Restarting session");
        self.board = Board::new();
        self.to_move = self.options.first_player;
        self.status = GameStatus::InProgress;
        self.history = History::new();
        self.moves.clear();
    }

    /// True when the game is still running and the computer is to move.
    pub fn is_computer_turn(&self) -> bool {
        !self.status.is_over() && self.options.computer_player == Some(self.to_move)
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the board history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the moves played so far, in order.
    pub fn moves(&self) -> &[Played] {
        &self.moves
    }

    /// Returns the settings this session was created with.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IllegalMoveReason;

    fn two_humans() -> SessionOptions {
        SessionOptions::default().with_computer_player(None)
    }

    #[test]
    fn test_new_session() {
        let session = Session::default();
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.to_move(), Player::X);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().cursor(), 0);
    }

    #[test]
    fn test_first_player_configurable() {
        let mut session = Session::new(two_humans().with_first_player(Player::O));
        assert_eq!(session.to_move(), Player::O);
        session.apply_move(Move::new(1, 1)).unwrap();
        assert_eq!(
            session.board().get(Move::new(1, 1)),
            Some(Square::Occupied(Player::O))
        );
        assert_eq!(session.to_move(), Player::X);
    }

    #[test]
    fn test_apply_move_appends_history() {
        let mut session = Session::new(two_humans());
        let status = session.apply_move(Move::new(0, 0)).unwrap();
        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().live(), session.board());
        assert_eq!(session.history().cursor(), 1);
        assert_eq!(session.to_move(), Player::O);
        assert_eq!(session.moves(), &[Played::new(Player::X, Move::new(0, 0))]);
    }

    #[test]
    fn test_occupied_square_rejected_without_change() {
        let mut session = Session::new(two_humans());
        session.apply_move(Move::new(1, 1)).unwrap();
        let board = *session.board();
        let len = session.history().len();

        let err = session.apply_move(Move::new(1, 1)).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalMove {
                row: 1,
                col: 1,
                reason: IllegalMoveReason::Occupied
            }
        );
        assert_eq!(session.board(), &board);
        assert_eq!(session.history().len(), len);
        assert_eq!(session.to_move(), Player::O);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut session = Session::new(two_humans());
        assert!(matches!(
            session.apply_move(Move::new(3, 0)),
            Err(GameError::IllegalMove {
                reason: IllegalMoveReason::OutOfBounds,
                ..
            })
        ));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_game_over_rejects_moves() {
        let moves = [
            Move::new(0, 0),
            Move::new(1, 1),
            Move::new(0, 1),
            Move::new(1, 0),
            Move::new(0, 2),
        ];
        let mut session = Session::replay(two_humans(), &moves).unwrap();
        assert_eq!(session.status().winner(), Some(Player::X));
        assert!(matches!(
            session.apply_move(Move::new(2, 2)),
            Err(GameError::GameOver(_))
        ));
        assert!(matches!(
            session.apply_computer_move(),
            Err(GameError::GameOver(_))
        ));
        assert_eq!(session.history().len(), 6);
    }

    #[test]
    fn test_computer_move_needs_computer_turn() {
        let mut session = Session::new(SessionOptions::default().with_seed(Some(3)));
        assert!(matches!(
            session.apply_computer_move(),
            Err(GameError::InvalidState(_))
        ));
        assert_eq!(session.history().len(), 1);

        session.apply_move(Move::new(1, 1)).unwrap();
        assert!(session.is_computer_turn());
        session.apply_computer_move().unwrap();
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.to_move(), Player::X);
        assert_eq!(session.board().count(Player::O), 1);
    }

    #[test]
    fn test_computer_move_without_computer_player() {
        let mut session = Session::new(two_humans());
        assert!(matches!(
            session.apply_computer_move(),
            Err(GameError::InvalidState(_))
        ));
    }

    #[test]
    fn test_optimal_computer_blocks() {
        let options = SessionOptions::default().with_difficulty(Difficulty::Optimal);
        let mut session = Session::new(options);
        session.apply_move(Move::new(0, 0)).unwrap();
        session.apply_computer_move().unwrap();
        // Center is the only reply to a corner opening that does not lose.
        assert_eq!(
            session.board().get(Move::new(1, 1)),
            Some(Square::Occupied(Player::O))
        );

        session.apply_move(Move::new(0, 1)).unwrap();
        session.apply_computer_move().unwrap();
        assert_eq!(
            session.board().get(Move::new(0, 2)),
            Some(Square::Occupied(Player::O))
        );
    }

    #[test]
    fn test_seek_leaves_live_state_alone() {
        let mut session = Session::new(two_humans());
        session.apply_move(Move::new(0, 0)).unwrap();
        session.apply_move(Move::new(1, 1)).unwrap();
        let board = *session.board();

        let snapshot = session.seek(Direction::Previous);
        assert_eq!(snapshot.index(), &1);
        assert_eq!(session.board(), &board);
        assert_eq!(session.to_move(), Player::X);

        // Moves still go against the live board, and jump the cursor to it.
        session.apply_move(Move::new(2, 2)).unwrap();
        assert_eq!(session.history().cursor(), 3);
    }

    #[test]
    fn test_restart_resets_history_and_switches_difficulty() {
        let mut session = Session::new(two_humans());
        session.apply_move(Move::new(0, 0)).unwrap();
        let session = session.restart(Some(Difficulty::Optimal));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().cursor(), 0);
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.options().difficulty(), &Difficulty::Optimal);
        assert_eq!(session.options().computer_player(), &None);
    }

    #[test]
    fn test_seeded_random_sessions_agree() {
        let options = SessionOptions::default().with_seed(Some(99));
        let mut a = Session::new(options);
        let mut b = Session::new(options);
        a.apply_move(Move::new(0, 0)).unwrap();
        b.apply_move(Move::new(0, 0)).unwrap();
        a.apply_computer_move().unwrap();
        b.apply_computer_move().unwrap();
        assert_eq!(a.board(), b.board());
    }
}
