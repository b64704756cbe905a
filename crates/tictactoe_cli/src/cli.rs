//! Command-line interface for the tic-tac-toe binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_engine::{Difficulty, Player};

/// Tic-tac-toe against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./tictactoe.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Settings that override the config file
        #[command(flatten)]
        overrides: PlayOverrides,
    },

    /// Print the status of a board and the best move for each player
    Analyze {
        /// Nine squares row by row: X, O, and `.` or `_` for empty (e.g. "XO./.X./...")
        board: String,
    },

    /// Let the computer play against itself and tally the results
    Selfplay {
        /// Number of games to play
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Difficulty of the X player
        #[arg(long, default_value = "optimal")]
        x: Difficulty,

        /// Difficulty of the O player
        #[arg(long, default_value = "random")]
        o: Difficulty,

        /// Seed for the random players
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Game settings accepted on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct PlayOverrides {
    /// Opponent strength: random (easy) or optimal (hard)
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Player who moves first (x or o)
    #[arg(long)]
    pub first: Option<Player>,

    /// Player the computer controls (x or o)
    #[arg(long, conflicts_with = "two_player")]
    pub computer: Option<Player>,

    /// Two humans share the terminal; no computer player
    #[arg(long)]
    pub two_player: bool,

    /// Seed for the random opponent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause before showing the computer's move, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

impl Default for Command {
    fn default() -> Self {
        Command::Play {
            overrides: PlayOverrides::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_play() {
        let cli = Cli::try_parse_from(["tictactoe"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(Command::default(), Command::Play { .. }));
    }

    #[test]
    fn test_play_overrides_parse() {
        let cli = Cli::try_parse_from([
            "tictactoe",
            "play",
            "--difficulty",
            "hard",
            "--first",
            "o",
            "--delay-ms",
            "0",
        ])
        .unwrap();
        let Some(Command::Play { overrides }) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(overrides.difficulty, Some(Difficulty::Optimal));
        assert_eq!(overrides.first, Some(Player::O));
        assert_eq!(overrides.delay_ms, Some(0));
    }

    #[test]
    fn test_computer_conflicts_with_two_player() {
        assert!(
            Cli::try_parse_from(["tictactoe", "play", "--computer", "x", "--two-player"]).is_err()
        );
    }

    #[test]
    fn test_selfplay_defaults() {
        let cli = Cli::try_parse_from(["tictactoe", "selfplay"]).unwrap();
        let Some(Command::Selfplay { games, x, o, seed }) = cli.command else {
            panic!("expected selfplay");
        };
        assert_eq!(games, 10);
        assert_eq!(x, Difficulty::Optimal);
        assert_eq!(o, Difficulty::Random);
        assert_eq!(seed, None);
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["tictactoe", "analyze", "X........", "--config", "a.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
    }
}
