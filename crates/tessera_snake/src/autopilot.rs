//! # Autopilot
//!
//! A greedy controller: head for the nearest edible, never step onto a wall
//! or a collidable if any other move is available.

use tessera_core::Entity;

use crate::components::{Direction, Position};
use crate::world::{Board, SnakeWorld, COLLIDERS, FOODS, STEERABLE};

/// Picks a heading for the first steerable entity, or `None` to keep going.
#[must_use]
pub fn choose(world: &SnakeWorld, board: Board) -> Option<Direction> {
    let player = STEERABLE.first(world)?;
    let current = *world.direction.get(player)?;
    let head = *world.position.get(player)?;
    let target = nearest_edible(world, head);

    let mut candidates: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|&d| d != current.opposite())
        .collect();
    candidates.sort_by_key(|&d| {
        let next = head.step(d);
        let distance = target.map_or(0, |t| next.manhattan(t));
        // Prefer the current heading on ties.
        (distance, d != current)
    });

    let safe = candidates
        .iter()
        .copied()
        .find(|&d| is_safe(world, board, player, head.step(d)));
    match safe {
        Some(d) if d != current => Some(d),
        _ => None,
    }
}

fn nearest_edible(world: &SnakeWorld, from: Position) -> Option<Position> {
    FOODS
        .iter(world)
        .filter_map(|e| world.position.get(e).copied())
        .min_by_key(|&p| from.manhattan(p))
}

fn is_safe(world: &SnakeWorld, board: Board, player: Entity, cell: Position) -> bool {
    board.contains(cell)
        && !COLLIDERS
            .iter(world)
            .any(|e| e != player && world.position.get(e) == Some(&cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::{init_snake, spawn_apple, steer};

    #[test]
    fn test_turns_towards_food() {
        let mut world = SnakeWorld::new(16);
        init_snake(&mut world, 3).unwrap();
        let apple = spawn_apple(&mut world).unwrap();
        world.position.set(apple, Position::new(5, 1)).unwrap();

        assert_eq!(choose(&world, Board::new(20, 10)), Some(Direction::Up));
    }

    #[test]
    fn test_keeps_heading_when_aligned() {
        let mut world = SnakeWorld::new(16);
        init_snake(&mut world, 3).unwrap();
        let apple = spawn_apple(&mut world).unwrap();
        world.position.set(apple, Position::new(9, 5)).unwrap();

        assert_eq!(choose(&world, Board::new(20, 10)), None);
    }

    #[test]
    fn test_avoids_wall() {
        let mut world = SnakeWorld::new(16);
        let head = init_snake(&mut world, 3).unwrap();
        world.position.set(head, Position::new(5, 0)).unwrap();
        steer(&mut world, Direction::Up);
        let apple = spawn_apple(&mut world).unwrap();
        world.position.set(apple, Position::new(5, 0)).unwrap();

        let dir = choose(&world, Board::new(20, 10)).unwrap();
        assert!(matches!(dir, Direction::Left | Direction::Right));
    }
}
