//! # Tessera Core
//!
//! Minimal Entity Component System runtime:
//! - Entity ids recycled through a bounded LIFO free list
//! - One fixed-capacity value/presence array pair per component type
//! - Conjunctive queries over 1 to 3 components, visited in ascending id order
//!
//! ## Architecture Rules
//!
//! 1. **Fixed capacity** - Every array is sized once, when the world is built
//! 2. **Owned worlds** - No globals; any number of worlds may coexist
//! 3. **Single thread** - No locks, no interior mutability
//!
//! ## Example
//!
//! ```rust
//! use tessera_core::{declare_world, EcsResult, EcsWorld, Query};
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq)]
//! pub struct Position { pub x: i32, pub y: i32 }
//!
//! declare_world! {
//!     /// Game state.
//!     pub struct Game {
//!         components {
//!             /// Where things are.
//!             pub position: Position,
//!             /// Things that move.
//!             pub velocity: Position,
//!         }
//!     }
//!     presence mod has;
//! }
//!
//! fn main() -> EcsResult<()> {
//!     let mut game = Game::new(1024);
//!     let e = game.create_entity()?;
//!     game.position.set(e, Position { x: 0, y: 0 })?;
//!     game.velocity.set(e, Position { x: 1, y: 0 })?;
//!
//!     Query::two(has::position, has::velocity).for_each(&mut game, |g, e| {
//!         if let (Some(&v), Some(p)) = (g.velocity.get(e), g.position.get_mut(e)) {
//!             p.x += v.x;
//!             p.y += v.y;
//!         }
//!     });
//!     assert_eq!(game.position.get(e), Some(&Position { x: 1, y: 0 }));
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;

pub use config::{WorldConfig, DEFAULT_MAX_ENTITIES};
pub use ecs::{
    Component, ComponentStorage, EcsWorld, Entity, EntityManager, Presence, Query, QueryCursor,
    QueryIter, MAX_TERMS,
};
pub use error::{EcsError, EcsResult};
