//! # Snake Error Types

use thiserror::Error;

use tessera_core::EcsError;

/// Errors that can occur while setting up or running a game.
#[derive(Error, Debug)]
pub enum SnakeError {
    /// An ECS precondition was violated.
    #[error(transparent)]
    Ecs(#[from] EcsError),

    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`SnakeConfig`](crate::SnakeConfig).
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but describes an unplayable game.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every board cell is taken, so an edible cannot be placed.
    #[error("no free cell left on a {width}x{height} board")]
    BoardFull {
        /// Board width.
        width: i32,
        /// Board height.
        height: i32,
    },
}

/// Result type for snake operations.
pub type SnakeResult<T> = Result<T, SnakeError>;
