//! Non-interactive commands: board analysis and computer self-play.

use anyhow::{Context, Result};
use derive_getters::Getters;
use derive_more::Display;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use tictactoe_engine::search::score_moves;
use tictactoe_engine::{
    Board, Difficulty, GameStatus, Player, Session, SessionOptions, best_move, choose_move,
    evaluate,
};
use tracing::{debug, info, instrument};

/// Prints the status of `board` and, while play continues, every legal
/// move's minimax score and the best move for each player.
#[instrument(skip(out))]
pub fn analyze(board: &str, out: &mut impl Write) -> Result<GameStatus> {
    let board: Board = board.parse().context("Failed to parse board")?;
    let status = evaluate(&board);

    writeln!(out, "{board}\n")?;
    writeln!(out, "Status: {status}")?;
    if let Some(line) = status.winning_line() {
        let squares: Vec<String> = line.iter().map(ToString::to_string).collect();
        writeln!(out, "Winning line: {}", squares.join(" "))?;
    }
    if status.is_over() {
        return Ok(status);
    }

    for player in [Player::X, Player::O] {
        let best = best_move(&board, player)?;
        let scores: Vec<String> = score_moves(&board, player)?
            .into_iter()
            .map(|(mv, score)| format!("{mv}={score}"))
            .collect();
        writeln!(out, "{player}: best {best}  [{}]", scores.join(" "))?;
    }
    Ok(status)
}

/// Results of a batch of self-play games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Getters)]
#[display("X wins: {x_wins}, O wins: {o_wins}, draws: {draws}")]
pub struct Tally {
    /// Games won by X.
    x_wins: u32,
    /// Games won by O.
    o_wins: u32,
    /// Drawn games.
    draws: u32,
}

impl Tally {
    fn record(&mut self, status: GameStatus) {
        match status.winner() {
            Some(Player::X) => self.x_wins += 1,
            Some(Player::O) => self.o_wins += 1,
            None => self.draws += 1,
        }
    }
}

/// Plays `games` games with each side choosing moves at its own difficulty.
#[instrument(skip(out))]
pub fn selfplay(
    games: u32,
    x: Difficulty,
    o: Difficulty,
    seed: Option<u64>,
    out: &mut impl Write,
) -> Result<Tally> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let options = SessionOptions::default().with_computer_player(None);
    let mut tally = Tally::default();

    for game in 1..=games {
        let mut session = Session::new(options);
        while !session.status().is_over() {
            let player = session.to_move();
            let difficulty = match player {
                Player::X => x,
                Player::O => o,
            };
            let mv = choose_move(difficulty, session.board(), player, &mut rng)?;
            session.apply_move(mv)?;
        }

        let status = session.status();
        debug!(game, %status, "Self-play game finished");
        let moves: Vec<String> = session.moves().iter().map(|p| p.mv.to_string()).collect();
        writeln!(out, "Game {game}: {status} ({})", moves.join(" "))?;
        tally.record(status);
    }

    info!(%tally, "Self-play complete");
    writeln!(out, "{tally}")?;
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_finished_board() {
        let mut out = Vec::new();
        let status = analyze("XXX/OO./...", &mut out).unwrap();
        assert_eq!(status.winner(), Some(Player::X));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Winning line: (0, 0) (0, 1) (0, 2)"));
    }

    #[test]
    fn test_analyze_in_progress_board() {
        let mut out = Vec::new();
        analyze("XX./OO./...", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("X: best (0, 2)"));
        assert!(text.contains("O: best (1, 2)"));
    }

    #[test]
    fn test_analyze_rejects_garbage() {
        let mut out = Vec::new();
        assert!(analyze("not a board", &mut out).is_err());
    }

    #[test]
    fn test_optimal_selfplay_always_draws() {
        let mut out = Vec::new();
        let tally = selfplay(2, Difficulty::Optimal, Difficulty::Optimal, Some(1), &mut out).unwrap();
        assert_eq!(tally.draws(), &2);
    }

    #[test]
    fn test_random_never_beats_optimal() {
        let mut out = Vec::new();
        let tally = selfplay(10, Difficulty::Random, Difficulty::Optimal, Some(5), &mut out).unwrap();
        assert_eq!(tally.x_wins(), &0);
        assert_eq!(tally.o_wins() + tally.draws(), 10);
    }
}
