//! # Game Configuration
//!
//! Loaded once at startup from TOML. Every key is optional:
//!
//! ```toml
//! width = 20
//! height = 10
//! initial_length = 3
//! tick_ms = 200
//! seed = 42
//!
//! [world]
//! max_entities = 1024
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tessera_core::WorldConfig;

use crate::error::{SnakeError, SnakeResult};
use crate::world::Board;

/// Column of the head when a game starts.
pub const SPAWN_X: i32 = 5;

/// Row of the snake when a game starts.
pub const SPAWN_Y: i32 = 5;

/// Settings for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Board columns.
    pub width: u16,
    /// Board rows.
    pub height: u16,
    /// Segments in the starting snake, head included.
    pub initial_length: u16,
    /// Milliseconds between ticks when playing in real time.
    pub tick_ms: u64,
    /// Seed for edible placement; derived from the clock when absent.
    pub seed: Option<u64>,
    /// Entity capacity of the world.
    pub world: WorldConfig,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 10,
            initial_length: 3,
            tick_ms: 200,
            seed: None,
            world: WorldConfig::default(),
        }
    }
}

impl SnakeConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or an unplayable configuration.
    pub fn from_toml_str(source: &str) -> SnakeResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or [`from_toml_str`](Self::from_toml_str) fails.
    pub fn load(path: impl AsRef<Path>) -> SnakeResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks that the game can start and run to a full board.
    ///
    /// # Errors
    ///
    /// [`SnakeError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> SnakeResult<()> {
        self.world.validate()?;

        let min_side = SPAWN_X.max(SPAWN_Y) + 1;
        if i32::from(self.width) < min_side || i32::from(self.height) < min_side {
            return Err(SnakeError::InvalidConfig(format!(
                "board must be at least {min_side}x{min_side}, got {}x{}",
                self.width, self.height
            )));
        }

        if self.initial_length == 0 || i32::from(self.initial_length) > SPAWN_X + 1 {
            return Err(SnakeError::InvalidConfig(format!(
                "initial_length must be between 1 and {}, got {}",
                SPAWN_X + 1,
                self.initial_length
            )));
        }

        // A full board plus the edible must fit in the world.
        let needed = self.board().cells() + 1;
        if needed > self.world.max_entities {
            return Err(SnakeError::InvalidConfig(format!(
                "world.max_entities must be at least {needed} for a {}x{} board",
                self.width, self.height
            )));
        }

        Ok(())
    }

    /// Returns the board described by this config.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::new(i32::from(self.width), i32::from(self.height))
    }

    /// Returns the real-time tick interval.
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SnakeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.board(), Board::new(20, 10));
        assert_eq!(config.tick_duration(), Duration::from_millis(200));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = SnakeConfig::from_toml_str(
            "width = 12\nseed = 7\n\n[world]\nmax_entities = 256\n",
        )
        .unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.world.max_entities, 256);
    }

    #[test]
    fn test_rejects_small_board() {
        let err = SnakeConfig::from_toml_str("width = 4").unwrap_err();
        assert!(matches!(err, SnakeError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_long_snake() {
        let err = SnakeConfig::from_toml_str("initial_length = 7").unwrap_err();
        assert!(matches!(err, SnakeError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_small_world() {
        let err = SnakeConfig::from_toml_str("[world]\nmax_entities = 100").unwrap_err();
        assert!(err.to_string().contains("at least 201"));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = SnakeConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, SnakeError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SnakeConfig::load("/nonexistent/tessera/snake.toml").unwrap_err();
        assert!(matches!(err, SnakeError::Io(_)));
    }
}
