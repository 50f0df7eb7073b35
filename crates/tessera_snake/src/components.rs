//! # Snake Components
//!
//! Pure data. Marker components are zero-sized.

use tessera_core::Entity;

/// Can be run into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Collidable;

/// Eats edibles it lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Consumer;

/// Steered by player input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interactable;

/// Heading of a moving entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    #[default]
    Right,
}

impl Direction {
    /// All directions, in input-key order (w, s, a, d).
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the reverse heading.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(dx, dy)` of one step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Maps a `wasd` key to a direction.
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            'w' => Some(Self::Up),
            's' => Some(Self::Down),
            'a' => Some(Self::Left),
            'd' => Some(Self::Right),
            _ => None,
        }
    }
}

/// Glyph used by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Drawable {
    /// Character drawn at the entity's cell.
    pub symbol: char,
}

/// Something a consumer can eat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edible {
    /// Score awarded when eaten.
    pub points: u32,
    /// Whether the consumer grows a segment.
    pub grows: bool,
    /// Whether the edible reappears elsewhere instead of being destroyed.
    pub resets: bool,
}

/// Moves into its lead's cell whenever the lead moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Follower {
    /// The entity being followed.
    pub lead: Entity,
}

/// Cell on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the Manhattan distance to `other`.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Direction::from_key('w'), Some(Direction::Up));
        assert_eq!(Direction::from_key('d'), Some(Direction::Right));
        assert_eq!(Direction::from_key('q'), None);
    }

    #[test]
    fn test_position_step() {
        let p = Position::new(5, 5);
        assert_eq!(p.step(Direction::Up), Position::new(5, 4));
        assert_eq!(p.step(Direction::Left), Position::new(4, 5));
        assert_eq!(p.manhattan(Position::new(2, 9)), 7);
    }
}
