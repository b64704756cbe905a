//! Line-oriented terminal front end.
//!
//! Renders boards, turns typed commands into engine calls, and owns the
//! cosmetic pause before the computer's mark appears. The engine itself
//! never waits.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::time::Duration;
use tictactoe_engine::{
    Board, Difficulty, Direction, GameStatus, Move, Player, SIZE, Session, SessionOptions, Snapshot,
};
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  <row> <col>     place your mark, e.g. `1 1` (rows and columns 0-2)
  <0-8> | <name>  place by index or by name, e.g. `4` or `center`
  prev | next     step through the history of this game
  new [level]     start over, optionally at `random`/`easy` or `optimal`/`hard`
  help            show this text
  quit            leave";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Place(Move),
    Seek(Direction),
    Restart(Option<Difficulty>),
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let mut words = trimmed.split_whitespace();
        let head = words.next().unwrap_or_default().to_lowercase();

        match head.as_str() {
            "q" | "quit" | "exit" => Input::Quit,
            "h" | "help" | "?" => Input::Help,
            "p" | "n" => Input::Seek(if head == "p" {
                Direction::Previous
            } else {
                Direction::Next
            }),
            "new" | "restart" => match words.next() {
                None => Input::Restart(None),
                Some(level) => match level.parse::<Difficulty>() {
                    Ok(difficulty) => Input::Restart(Some(difficulty)),
                    Err(_) => Input::Unknown(trimmed.to_string()),
                },
            },
            _ => {
                if let Ok(direction) = head.parse::<Direction>() {
                    return Input::Seek(direction);
                }
                match trimmed.parse::<Move>() {
                    Ok(mv) => Input::Place(mv),
                    Err(_) => Input::Unknown(trimmed.to_string()),
                }
            }
        }
    }
}

/// Interactive game over a reader and a writer.
pub struct Terminal<R, W> {
    input: R,
    output: W,
    session: Session,
    delay: Duration,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Creates a terminal game with a fresh session.
    pub fn new(input: R, output: W, options: SessionOptions, delay: Duration) -> Self {
        Self {
            input,
            output,
            session: Session::new(options),
            delay,
        }
    }

    /// The session being played.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until `quit` or end of input. Returns the status of the last game.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<GameStatus> {
        writeln!(self.output, "{HELP}\n")?;
        self.announce_new_game()?;

        loop {
            if self.session.is_computer_turn() {
                self.computer_turn()?;
                continue;
            }

            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input");
                break;
            }

            match Input::parse(&line) {
                Input::Quit => break,
                Input::Help => writeln!(self.output, "{HELP}")?,
                Input::Place(mv) => self.human_turn(mv)?,
                Input::Seek(direction) => {
                    let snapshot = self.session.seek(direction);
                    self.show_snapshot(&snapshot)?;
                }
                Input::Restart(difficulty) => {
                    self.session.reset(difficulty);
                    self.announce_new_game()?;
                }
                Input::Unknown(text) if text.is_empty() => {}
                Input::Unknown(text) => {
                    writeln!(self.output, "Unrecognized input {text:?}; type `help`.")?;
                }
            }
        }

        Ok(self.session.status())
    }

    fn human_turn(&mut self, mv: Move) -> Result<()> {
        match self.session.apply_move(mv) {
            Ok(status) => {
                render(&mut self.output, self.session.board(), status.winning_line())?;
                self.report(status)?;
            }
            Err(e) => {
                warn!(error = %e, "Move rejected");
                writeln!(self.output, "{e}")?;
            }
        }
        Ok(())
    }

    fn computer_turn(&mut self) -> Result<()> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let status = self.session.apply_computer_move()?;
        if let Some(played) = self.session.moves().last() {
            writeln!(self.output, "Computer plays {}", played.mv)?;
        }
        render(&mut self.output, self.session.board(), status.winning_line())?;
        self.report(status)
    }

    fn report(&mut self, status: GameStatus) -> Result<()> {
        if status.is_over() {
            info!(%status, moves = self.session.moves().len(), "Game finished");
            writeln!(self.output, "{}", outcome_label(&self.session))?;
            writeln!(
                self.output,
                "Use `prev`/`next` to review the game or `new` to play again."
            )?;
        } else {
            writeln!(self.output, "{} to move.", self.session.to_move())?;
        }
        Ok(())
    }

    fn show_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        let last = snapshot.len() - 1;
        writeln!(self.output, "Move {} of {}", snapshot.index(), last)?;
        let line = if snapshot.is_live() {
            self.session.status().winning_line().copied()
        } else {
            None
        };
        render(&mut self.output, snapshot.board(), line.as_ref())?;
        if snapshot.at_start() {
            writeln!(self.output, "(start of game)")?;
        }
        if snapshot.is_live() {
            writeln!(self.output, "(current position)")?;
        }
        Ok(())
    }

    fn announce_new_game(&mut self) -> Result<()> {
        let options = *self.session.options();
        match options.computer_player() {
            Some(computer) => writeln!(
                self.output,
                "New game: you play {}, the computer plays {} ({}).",
                computer.opponent(),
                computer,
                options.difficulty()
            )?,
            None => writeln!(self.output, "New game: two players.")?,
        }
        render(&mut self.output, self.session.board(), None)?;
        writeln!(self.output, "{} to move.", self.session.to_move())?;
        Ok(())
    }
}

/// Writes the board with coordinates; squares on `line` are bracketed.
pub fn render(out: &mut impl Write, board: &Board, line: Option<&[Move; SIZE]>) -> Result<()> {
    writeln!(out, "    0   1   2")?;
    for (r, row) in board.rows().iter().enumerate() {
        write!(out, "{r} ")?;
        for (c, square) in row.iter().enumerate() {
            let mark = square.player().map_or('.', Player::symbol);
            let highlighted = line.is_some_and(|l| l.contains(&Move::new(r, c)));
            if highlighted {
                write!(out, "[{mark}]")?;
            } else {
                write!(out, " {mark} ")?;
            }
            if c < SIZE - 1 {
                write!(out, "|")?;
            }
        }
        writeln!(out)?;
        if r < SIZE - 1 {
            writeln!(out, "  ---+---+---")?;
        }
    }
    Ok(())
}

/// Result line for a finished game, naming the human and the computer when
/// one side is automated.
pub fn outcome_label(session: &Session) -> String {
    match session.status() {
        GameStatus::InProgress => "Game in progress".to_string(),
        GameStatus::Draw => "Draw!".to_string(),
        GameStatus::Win { player, .. } => match session.options().computer_player() {
            Some(computer) if *computer == player => "Computer wins!".to_string(),
            Some(_) => "Human wins!".to_string(),
            None => format!("Player {player} wins!"),
        },
    }
}
