//! tictactoe - play against a minimax opponent in the terminal.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use tictactoe_cli::{AppConfig, Cli, Command, Terminal, analyze, selfplay};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or_default() {
        Command::Play { overrides } => {
            config.apply(&overrides);
            info!(?config, "Starting interactive game");
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut terminal = Terminal::new(
                stdin.lock(),
                stdout.lock(),
                config.session_options(),
                config.computer_delay(),
            );
            terminal.run()?;
        }
        Command::Analyze { board } => {
            analyze(&board, &mut std::io::stdout().lock())?;
        }
        Command::Selfplay { games, x, o, seed } => {
            selfplay(games, x, o, seed, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
