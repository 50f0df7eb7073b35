//! # Snake Systems
//!
//! Spawning helpers and the per-tick systems. Everything goes through
//! component storages and queries; nothing here knows what a "snake" is.
//!
//! A tick runs, in order:
//! 1. [`update_interactables`] - followers catch up, then movers step
//! 2. [`update_edibles`] - consumers eat what they landed on
//! 3. [`is_game_over`] - players off the board or on a collidable lose

use rand::Rng;
use tessera_core::{EcsResult, EcsWorld, Entity};

use crate::components::{
    Collidable, Consumer, Direction, Drawable, Edible, Follower, Interactable, Position,
};
use crate::config::{SPAWN_X, SPAWN_Y};
use crate::error::{SnakeError, SnakeResult};
use crate::world::{
    Board, SnakeWorld, COLLIDERS, EATERS, FOLLOWERS, FOODS, MOVERS, PLACED, PLAYERS, STEERABLE,
};

/// Glyph of a head.
pub const HEAD_SYMBOL: char = 'O';

/// Glyph of a trailing segment.
pub const SEGMENT_SYMBOL: char = 'o';

/// Glyph of an apple.
pub const APPLE_SYMBOL: char = '@';

/// Spawns a steerable, eating, collidable head.
///
/// # Errors
///
/// Fails when the world is out of entity ids.
pub fn spawn_head(world: &mut SnakeWorld, pos: Position, dir: Direction) -> EcsResult<Entity> {
    let head = world.create_entity()?;
    world.interactable.set(head, Interactable)?;
    world.direction.set(head, dir)?;
    world.consumer.set(head, Consumer)?;
    world.drawable.set(head, Drawable { symbol: HEAD_SYMBOL })?;
    world.position.set(head, pos)?;
    world.collidable.set(head, Collidable)?;
    Ok(head)
}

/// Spawns a collidable segment trailing `follows`.
///
/// # Errors
///
/// Fails when the world is out of entity ids.
pub fn spawn_segment(world: &mut SnakeWorld, pos: Position, follows: Entity) -> EcsResult<Entity> {
    let segment = world.create_entity()?;
    world.position.set(segment, pos)?;
    world.follower.set(segment, Follower { lead: follows })?;
    world.drawable.set(segment, Drawable { symbol: SEGMENT_SYMBOL })?;
    world.collidable.set(segment, Collidable)?;
    Ok(segment)
}

/// Spawns a head facing right at the spawn cell with `length - 1` segments
/// trailing to its left. Returns the head.
///
/// # Errors
///
/// Fails when the world is out of entity ids.
pub fn init_snake(world: &mut SnakeWorld, length: u16) -> EcsResult<Entity> {
    let head = spawn_head(world, Position::new(SPAWN_X, SPAWN_Y), Direction::Right)?;
    let mut lead = head;
    for i in 1..i32::from(length) {
        lead = spawn_segment(world, Position::new(SPAWN_X - i, SPAWN_Y), lead)?;
    }
    Ok(head)
}

/// Spawns an apple worth one point that grows the eater and respawns.
///
/// It sits at the origin until [`place_edible`] moves it.
///
/// # Errors
///
/// Fails when the world is out of entity ids.
pub fn spawn_apple(world: &mut SnakeWorld) -> EcsResult<Entity> {
    let apple = world.create_entity()?;
    world.drawable.set(apple, Drawable { symbol: APPLE_SYMBOL })?;
    world.edible.set(
        apple,
        Edible {
            points: 1,
            grows: true,
            resets: true,
        },
    )?;
    world.position.set(apple, Position::default())?;
    Ok(apple)
}

/// Walks the follow links from `lead` to the last entity of its chain.
///
/// Returns `lead` itself when nothing follows it. The walk stops after
/// `capacity` links, so a corrupted cyclic chain cannot hang it.
#[must_use]
pub fn last_follower(world: &SnakeWorld, lead: Entity) -> Entity {
    let mut follower_of = vec![Entity::INVALID; world.capacity()];
    for e in FOLLOWERS.iter(world) {
        if let Some(link) = world.follower.get(e) {
            if let Some(slot) = follower_of.get_mut(link.lead.index()) {
                *slot = e;
            }
        }
    }

    let mut current = lead;
    for _ in 0..world.capacity() {
        match follower_of.get(current.index()) {
            Some(&next) if !next.is_invalid() => current = next,
            _ => break,
        }
    }
    current
}

/// Adds a segment to the end of `lead`'s chain, on the tail's cell.
///
/// # Errors
///
/// Fails when the tail has no position or the world is out of ids.
pub fn grow(world: &mut SnakeWorld, lead: Entity) -> EcsResult<Entity> {
    let tail = last_follower(world, lead);
    let pos = *world.position.try_get(tail)?;
    let segment = spawn_segment(world, pos, tail)?;
    tracing::debug!("grew {} behind {}", segment, tail);
    Ok(segment)
}

/// Checks whether any entity sits on `pos`.
#[must_use]
pub fn is_occupied(world: &SnakeWorld, pos: Position) -> bool {
    PLACED
        .iter(world)
        .any(|e| world.position.get(e) == Some(&pos))
}

/// Moves `edible` to a random unoccupied cell and returns it.
///
/// The edible's current cell counts as occupied, so it always moves.
///
/// # Errors
///
/// - [`SnakeError::BoardFull`] when no cell is free.
/// - An ECS error if `edible` is out of range.
pub fn place_edible<R: Rng>(
    world: &mut SnakeWorld,
    edible: Entity,
    board: Board,
    rng: &mut R,
) -> SnakeResult<Position> {
    let mut occupied = vec![false; board.cells()];
    for e in PLACED.iter(world) {
        if let Some(idx) = world.position.get(e).and_then(|&p| board.cell_index(p)) {
            occupied[idx] = true;
        }
    }

    let free = occupied.iter().filter(|&&taken| !taken).count();
    if free == 0 {
        return Err(SnakeError::BoardFull {
            width: board.width,
            height: board.height,
        });
    }

    let pick = rng.gen_range(0..free);
    let idx = occupied
        .iter()
        .enumerate()
        .filter(|&(_, &taken)| !taken)
        .nth(pick)
        .map_or(0, |(idx, _)| idx);
    let pos = board.position_of(idx);
    debug_assert!(!is_occupied(world, pos), "picked taken cell {pos:?}");

    world.position.set(edible, pos)?;
    Ok(pos)
}

/// Moves every entity that has a heading one cell forward.
///
/// Each mover first drags its followers (see [`update_followers_of`]), so
/// the chain shifts one link while the mover advances.
///
/// # Errors
///
/// Propagates ECS errors from the follower cascade.
pub fn update_interactables(world: &mut SnakeWorld) -> EcsResult<()> {
    MOVERS.try_for_each(world, |w, e| -> EcsResult<()> {
        let Some(&dir) = w.direction.get(e) else {
            return Ok(());
        };
        update_followers_of(w, e)?;
        if let Some(pos) = w.position.get_mut(e) {
            *pos = pos.step(dir);
        }
        Ok(())
    })
}

/// Moves every follower of `leader` onto `leader`'s cell, after recursively
/// doing the same for their own followers.
///
/// The deepest link moves first, so each segment takes its lead's previous
/// cell.
///
/// # Errors
///
/// Propagates ECS errors from position updates.
pub fn update_followers_of(world: &mut SnakeWorld, leader: Entity) -> EcsResult<()> {
    cascade(world, leader, 0)
}

fn cascade(world: &mut SnakeWorld, leader: Entity, depth: usize) -> EcsResult<()> {
    if depth >= world.capacity() {
        tracing::warn!("follow chain from {} loops, stopping", leader);
        return Ok(());
    }
    let Some(&lead_pos) = world.position.get(leader) else {
        return Ok(());
    };

    FOLLOWERS.try_for_each(world, |w, e| -> EcsResult<()> {
        let follows_leader = w.follower.get(e).is_some_and(|f| f.lead == leader);
        if follows_leader && e != leader {
            cascade(w, e, depth + 1)?;
            w.position.set(e, lead_pos)?;
        }
        Ok(())
    })
}

/// Lets every consumer eat the edibles on its cell.
///
/// Eating adds the edible's points to the score, grows the consumer if the
/// edible says so, and then either re-places or destroys the edible.
///
/// # Errors
///
/// Propagates growth, placement and destroy failures.
pub fn update_edibles<R: Rng>(
    world: &mut SnakeWorld,
    board: Board,
    rng: &mut R,
) -> SnakeResult<()> {
    EATERS.try_for_each(world, |w, mouth| -> SnakeResult<()> {
        FOODS.try_for_each(w, |w, food| -> SnakeResult<()> {
            let (Some(mouth_pos), Some(food_pos)) = (w.position.get(mouth), w.position.get(food))
            else {
                return Ok(());
            };
            if mouth_pos != food_pos {
                return Ok(());
            }
            let Some(&edible) = w.edible.get(food) else {
                return Ok(());
            };

            w.score += edible.points;
            tracing::debug!("{} ate {}, score {}", mouth, food, w.score);
            if edible.grows {
                grow(w, mouth)?;
            }
            if edible.resets {
                place_edible(w, food, board, &mut *rng)?;
            } else {
                w.destroy_entity(food)?;
            }
            Ok(())
        })
    })
}

/// Checks whether any player left the board or hit a collidable.
#[must_use]
pub fn is_game_over(world: &SnakeWorld, board: Board) -> bool {
    PLAYERS.iter(world).any(|player| {
        let Some(&pos) = world.position.get(player) else {
            return false;
        };
        !board.contains(pos)
            || COLLIDERS
                .iter(world)
                .any(|other| other != player && world.position.get(other) == Some(&pos))
    })
}

/// Turns every steerable entity towards `dir` unless that would reverse it.
pub fn steer(world: &mut SnakeWorld, dir: Direction) {
    STEERABLE.for_each(world, |w, e| {
        if let Some(current) = w.direction.get_mut(e) {
            if *current != dir.opposite() {
                *current = dir;
            }
        }
    });
}
