//! # Snake World
//!
//! The world aggregate, the board it plays on, and the queries the systems
//! run over it.

use tessera_core::{declare_world, Query};

use crate::components::{
    Collidable, Consumer, Direction, Drawable, Edible, Follower, Interactable, Position,
};

declare_world! {
    /// Every entity and component of one game, plus the score.
    pub struct SnakeWorld {
        components {
            /// Things a head dies on.
            pub collidable: Collidable,
            /// Things that eat.
            pub consumer: Consumer,
            /// Headings of things that move on their own.
            pub direction: Direction,
            /// Glyphs for rendering.
            pub drawable: Drawable,
            /// Things that can be eaten.
            pub edible: Edible,
            /// Follow links between segments.
            pub follower: Follower,
            /// Things steered by input.
            pub interactable: Interactable,
            /// Board cells.
            pub position: Position,
        }
        resources {
            /// Points scored so far.
            pub score: u32,
        }
    }
    presence mod has;
}

/// Entities that move on their own.
pub const MOVERS: Query<SnakeWorld> = Query::two(has::position, has::direction);

/// Entities that trail another entity.
pub const FOLLOWERS: Query<SnakeWorld> = Query::two(has::position, has::follower);

/// Entities that eat.
pub const EATERS: Query<SnakeWorld> = Query::two(has::position, has::consumer);

/// Entities that can be eaten.
pub const FOODS: Query<SnakeWorld> = Query::two(has::position, has::edible);

/// Player-controlled entities on the board.
pub const PLAYERS: Query<SnakeWorld> = Query::two(has::position, has::interactable);

/// Player-controlled entities with a heading.
pub const STEERABLE: Query<SnakeWorld> = Query::two(has::interactable, has::direction);

/// Entities a player can crash into.
pub const COLLIDERS: Query<SnakeWorld> = Query::two(has::position, has::collidable);

/// Entities the renderer draws.
pub const VISIBLE: Query<SnakeWorld> = Query::two(has::drawable, has::position);

/// Anything occupying a cell.
pub const PLACED: Query<SnakeWorld> = Query::one(has::position);

/// Rectangular play area with its origin at the top-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

impl Board {
    /// Creates a board.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Checks whether `pos` is on the board.
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Returns the number of cells.
    #[must_use]
    pub const fn cells(self) -> usize {
        self.width.unsigned_abs() as usize * self.height.unsigned_abs() as usize
    }

    /// Returns the row-major index of an on-board cell.
    #[must_use]
    pub fn cell_index(self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            usize::try_from(pos.y * self.width + pos.x).ok()
        } else {
            None
        }
    }

    /// Returns the position of a row-major index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn position_of(self, index: usize) -> Position {
        let width = self.width.unsigned_abs() as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }
}
