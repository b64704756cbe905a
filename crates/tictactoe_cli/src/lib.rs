//! Terminal front end for the tic-tac-toe engine.
//!
//! - **cli**: argument parsing
//! - **config**: TOML settings with command-line overrides
//! - **terminal**: the interactive game loop and board rendering
//! - **commands**: board analysis and self-play

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod terminal;

pub use cli::{Cli, Command, PlayOverrides};
pub use commands::{Tally, analyze, selfplay};
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_FILE};
pub use terminal::{Terminal, outcome_label, render};
