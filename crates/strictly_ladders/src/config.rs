//! Game configuration loaded from TOML.
//!
//! ```toml
//! players = ["Ada", "Grace"]
//! reset_policy = "keep_roster"
//! win_rule = "reach_goal"
//! seed = 42
//!
//! [board]
//! shortcuts = [[2, 30], [8, 60]]
//! setbacks = [[40, 10]]
//! ```
//!
//! Every key is optional. Without a `[board]` table the reference board is
//! used.

use crate::board::{Board, STANDARD_SETBACKS, STANDARD_SHORTCUTS, WinRule};
use crate::dice::SeededDie;
use crate::game::Game;
use crate::phase::ResetPolicy;
use crate::roster::default_label;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Link table declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Ladders as `[origin, destination]` pairs.
    #[serde(default)]
    shortcuts: Vec<[u8; 2]>,
    /// Snakes as `[origin, destination]` pairs.
    #[serde(default)]
    setbacks: Vec<[u8; 2]>,
}

impl BoardConfig {
    /// Validates the table and builds a board.
    #[instrument(skip(self))]
    pub fn build(&self) -> Result<Board, ConfigError> {
        Board::from_parts(
            self.shortcuts.iter().map(|[from, to]| (*from, *to)),
            self.setbacks.iter().map(|[from, to]| (*from, *to)),
        )
        .map_err(|e| ConfigError::new(format!("Invalid board: {}", e)))
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            shortcuts: STANDARD_SHORTCUTS.iter().map(|&(a, b)| [a, b]).collect(),
            setbacks: STANDARD_SETBACKS.iter().map(|&(a, b)| [a, b]).collect(),
        }
    }
}

/// Configuration for a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Display names in turn order.
    #[serde(default = "default_players")]
    players: Vec<String>,

    /// What a reset does to the roster.
    #[serde(default)]
    reset_policy: ResetPolicy,

    /// Whether a ladder onto the winning square wins.
    #[serde(default)]
    win_rule: WinRule,

    /// Seed for the die; random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Alternate link table; the reference board when absent.
    #[serde(default)]
    board: Option<BoardConfig>,
}

#[instrument]
fn default_players() -> Vec<String> {
    (0..2).map(default_label).collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
            reset_policy: ResetPolicy::default(),
            win_rule: WinRule::default(),
            seed: None,
            board: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(players = config.players.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Replaces the player names.
    pub fn with_players(mut self, players: Vec<String>) -> Self {
        self.players = players;
        self
    }

    /// Replaces the die seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configured board.
    pub fn build_board(&self) -> Result<Board, ConfigError> {
        let board = match &self.board {
            Some(board) => board.build()?,
            None => Board::standard(),
        };
        Ok(board.with_win_rule(self.win_rule))
    }

    /// Builds a game in setup from this configuration.
    #[instrument(skip(self))]
    pub fn build_game(&self) -> Result<Game, ConfigError> {
        let board = self.build_board()?;
        Ok(Game::with_players(board, &self.players).with_reset_policy(self.reset_policy))
    }

    /// Builds the configured die.
    pub fn build_die(&self) -> SeededDie {
        match self.seed {
            Some(seed) => SeededDie::new(seed),
            None => SeededDie::from_entropy(),
        }
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
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GamePhase;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.build_board().unwrap(), Board::standard());
    }

    #[test]
    fn test_full_config() {
        let config = GameConfig::from_toml_str(
            r#"
            players = ["Ada", "Grace", "Linus"]
            reset_policy = "keep_roster"
            seed = 9

            [board]
            shortcuts = [[2, 30]]
            setbacks = [[40, 10]]
            "#,
        )
        .unwrap();
        assert_eq!(config.players().len(), 3);
        assert_eq!(*config.reset_policy(), ResetPolicy::KeepRoster);
        assert_eq!(*config.seed(), Some(9));
        assert_eq!(*config.win_rule(), WinRule::ExactRoll);

        let game = config.build_game().unwrap();
        assert_eq!(game.phase(), GamePhase::Setup);
        assert_eq!(game.roster().len(), 3);
        assert_eq!(game.reset_policy(), ResetPolicy::KeepRoster);
        assert_eq!(game.board().shortcuts().collect::<Vec<_>>(), vec![(2, 30)]);
    }

    #[test]
    fn test_win_rule_reaches_the_board() {
        let config = GameConfig::from_toml_str(r#"win_rule = "reach_goal""#).unwrap();
        assert_eq!(config.build_board().unwrap().win_rule(), WinRule::ReachGoal);
        assert!(GameConfig::from_toml_str(r#"win_rule = "sometimes""#).is_err());
    }

    #[test]
    fn test_invalid_board_is_reported() {
        let config = GameConfig::from_toml_str("[board]\nshortcuts = [[50, 10]]").unwrap();
        let err = config.build_game().unwrap_err();
        assert!(err.message.contains("Invalid board"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = GameConfig::from_toml_str("players = 3").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_default_board_config_matches_standard() {
        assert_eq!(BoardConfig::default().build().unwrap(), Board::standard());
    }
}
