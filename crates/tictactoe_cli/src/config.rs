//! Application configuration loaded from TOML.

use crate::cli::PlayOverrides;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tictactoe_engine::{Difficulty, Player, SessionOptions};
use tracing::{debug, info, instrument};

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "tictactoe.toml";

/// Settings for the terminal game.
///
/// Every field has a default, so a config file only needs the keys it
/// wants to change:
///
/// ```toml
/// difficulty = "hard"
/// first_player = "o"
/// computer_delay_ms = 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Opponent strength.
    difficulty: Difficulty,

    /// Who moves first.
    first_player: Player,

    /// Player the computer controls.
    computer_player: Player,

    /// Two humans share the terminal; `computer_player` is ignored.
    two_player: bool,

    /// Pause before the computer's move is shown.
    computer_delay_ms: u64,

    /// Seed for the random opponent.
    seed: Option<u64>,

    /// Log filter used when `RUST_LOG` is not set.
    log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            first_player: Player::X,
            computer_player: Player::O,
            two_player: false,
            computer_delay_ms: 600,
            seed: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the explicit `path`, or [`DEFAULT_CONFIG_FILE`] if it exists,
    /// or falls back to defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line overrides on top of the file settings.
    #[instrument(skip(self))]
    pub fn apply(&mut self, overrides: &PlayOverrides) {
        if let Some(difficulty) = overrides.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(first) = overrides.first {
            self.first_player = first;
        }
        if let Some(computer) = overrides.computer {
            self.computer_player = computer;
            self.two_player = false;
        }
        if overrides.two_player {
            self.two_player = true;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(delay) = overrides.delay_ms {
            self.computer_delay_ms = delay;
        }
    }

    /// Session settings derived from this config.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions::default()
            .with_first_player(self.first_player)
            .with_computer_player((!self.two_player).then_some(self.computer_player))
            .with_difficulty(self.difficulty)
            .with_seed(self.seed)
    }

    /// The presentation delay before a computer move is shown.
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
