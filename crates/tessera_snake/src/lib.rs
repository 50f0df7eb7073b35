//! # Tessera Snake
//!
//! Snake written as an ECS exercise. There is no snake type: a head is an
//! entity with a heading, input, a mouth and a body; segments are entities
//! that follow another entity. Systems are plain functions over queries.
//!
//! Terminal handling is not part of this crate. A [`Game`] takes one
//! optional heading per tick and renders frames as strings.
//!
//! ## Example
//!
//! ```rust
//! use tessera_snake::{Direction, Game, SnakeConfig, TickOutcome};
//!
//! let config = SnakeConfig { seed: Some(7), ..SnakeConfig::default() };
//! let mut game = Game::new(config)?;
//! assert_eq!(game.tick(Some(Direction::Down))?, TickOutcome::Running);
//! println!("{}", game.frame());
//! # Ok::<(), tessera_snake::SnakeError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod autopilot;
pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod render;
pub mod systems;
pub mod world;

pub use components::{
    Collidable, Consumer, Direction, Drawable, Edible, Follower, Interactable, Position,
};
pub use config::SnakeConfig;
pub use error::{SnakeError, SnakeResult};
pub use game::{Game, TickOutcome};
pub use world::{Board, SnakeWorld};
