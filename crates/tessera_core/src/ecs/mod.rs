//! # Entity Component System
//!
//! A fixed-capacity ECS for single-threaded simulations.
//!
//! ## Design Philosophy
//!
//! - All storage is pre-allocated at world creation
//! - Entity ids index directly into flat per-component arrays
//! - Presence flags live beside the values; clearing never moves data
//! - Queries are plain ascending scans over the whole capacity

mod component;
mod entity;
mod query;
mod storage;
mod world;

pub use component::Component;
pub use entity::{Entity, EntityManager};
pub use query::{Presence, Query, QueryCursor, QueryIter, MAX_TERMS};
pub use storage::ComponentStorage;
pub use world::EcsWorld;
