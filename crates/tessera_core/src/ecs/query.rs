//! # Query Engine
//!
//! Queries select the entities that have every one of 1 to 3 components.
//! A query is a conjunction of presence accessors and owns no state; every
//! traversal is a linear scan of `0..capacity` in ascending id order.
//!
//! Flags are read live at each index. A body that attaches or clears a
//! component at a later id is seen when the scan reaches that id, and a body
//! may start other traversals over the same world (reentrancy is safe
//! because cursors hold nothing but an index).

use std::fmt;
use std::iter::FusedIterator;

use super::entity::Entity;
use super::world::EcsWorld;

/// Maximum number of components in one query.
pub const MAX_TERMS: usize = 3;

/// Returns the presence flags of one component storage of a world.
pub type Presence<W> = for<'w> fn(&'w W) -> &'w [bool];

/// Conjunctive filter over component presence.
///
/// # Example
///
/// ```rust
/// use tessera_core::{declare_world, EcsResult, Entity, Query};
///
/// declare_world! {
///     /// Example world.
///     pub struct Demo {
///         components {
///             /// A.
///             pub a: u8,
///             /// B.
///             pub b: u8,
///         }
///     }
///     presence mod has;
/// }
///
/// fn main() -> EcsResult<()> {
///     let mut world = Demo::new(8);
///     for id in [0, 2, 4] {
///         world.a.set(Entity::new(id), 1)?;
///     }
///     for id in [2, 4, 6] {
///         world.b.set(Entity::new(id), 1)?;
///     }
///
///     let both = Query::two(has::a, has::b);
///     assert_eq!(both.collect(&world), vec![Entity::new(2), Entity::new(4)]);
///     Ok(())
/// }
/// ```
pub struct Query<W> {
    /// Accessors; only `terms[..len]` are used.
    terms: [Presence<W>; MAX_TERMS],
    len: usize,
}

impl<W> Clone for Query<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for Query<W> {}

impl<W> fmt::Debug for Query<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query").field("terms", &self.len).finish()
    }
}

impl<W: EcsWorld> Query<W> {
    /// Entities with component `a`.
    #[must_use]
    pub const fn one(a: Presence<W>) -> Self {
        Self {
            terms: [a, a, a],
            len: 1,
        }
    }

    /// Entities with components `a` and `b`.
    #[must_use]
    pub const fn two(a: Presence<W>, b: Presence<W>) -> Self {
        Self {
            terms: [a, b, b],
            len: 2,
        }
    }

    /// Entities with components `a`, `b` and `c`.
    #[must_use]
    pub const fn three(a: Presence<W>, b: Presence<W>, c: Presence<W>) -> Self {
        Self {
            terms: [a, b, c],
            len: 3,
        }
    }

    /// Returns the number of required components.
    #[inline]
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.len
    }

    /// Checks whether `entity` currently has every required component.
    #[inline]
    #[must_use]
    pub fn matches(&self, world: &W, entity: Entity) -> bool {
        let idx = entity.index();
        self.terms[..self.len]
            .iter()
            .all(|term| term(world).get(idx).copied().unwrap_or(false))
    }

    /// Iterates matching entities of a borrowed world.
    ///
    /// The iterator is lazy and can be cloned to restart from its current
    /// position; call `iter` again to restart from id 0.
    #[must_use]
    pub fn iter<'w>(&self, world: &'w W) -> QueryIter<'w, W> {
        QueryIter {
            cursor: self.cursor(),
            world,
        }
    }

    /// Returns a cursor positioned before id 0.
    #[must_use]
    pub const fn cursor(&self) -> QueryCursor<W> {
        QueryCursor {
            query: *self,
            next: 0,
        }
    }

    /// Runs `body` for every match while letting it mutate the world.
    ///
    /// Presence is re-checked at each id, so changes made by `body` to ids
    /// not yet visited take effect in this same pass.
    pub fn for_each<F>(&self, world: &mut W, mut body: F)
    where
        F: FnMut(&mut W, Entity),
    {
        let mut cursor = self.cursor();
        while let Some(entity) = cursor.advance(world) {
            body(world, entity);
        }
    }

    /// Like [`for_each`](Self::for_each), stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `body`.
    pub fn try_for_each<E, F>(&self, world: &mut W, mut body: F) -> Result<(), E>
    where
        F: FnMut(&mut W, Entity) -> Result<(), E>,
    {
        let mut cursor = self.cursor();
        while let Some(entity) = cursor.advance(world) {
            body(world, entity)?;
        }
        Ok(())
    }

    /// Collects matching ids in ascending order.
    #[must_use]
    pub fn collect(&self, world: &W) -> Vec<Entity> {
        self.iter(world).collect()
    }

    /// Counts matching entities.
    #[must_use]
    pub fn count(&self, world: &W) -> usize {
        self.iter(world).count()
    }

    /// Returns the lowest matching id.
    #[must_use]
    pub fn first(&self, world: &W) -> Option<Entity> {
        self.iter(world).next()
    }
}

/// Scan position of a query, detached from any borrow of the world.
///
/// Useful for `while let` loops whose body needs `&mut` access:
///
/// ```rust,ignore
/// let mut cursor = query.cursor();
/// while let Some(e) = cursor.advance(&world) {
///     world.position.set(e, ...)?;
/// }
/// ```
pub struct QueryCursor<W> {
    query: Query<W>,
    next: usize,
}

impl<W> Clone for QueryCursor<W> {
    fn clone(&self) -> Self {
        Self {
            query: self.query,
            next: self.next,
        }
    }
}

impl<W> fmt::Debug for QueryCursor<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCursor")
            .field("query", &self.query)
            .field("next", &self.next)
            .finish()
    }
}

impl<W: EcsWorld> QueryCursor<W> {
    /// Moves to the next matching id, reading presence flags now.
    pub fn advance(&mut self, world: &W) -> Option<Entity> {
        let capacity = world.capacity();
        while self.next < capacity {
            #[allow(clippy::cast_possible_truncation)]
            let entity = Entity::new(self.next as u32);
            self.next += 1;
            if self.query.matches(world, entity) {
                return Some(entity);
            }
        }
        None
    }

    /// Returns the next id the cursor will examine.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.next
    }

    /// Rewinds to id 0.
    #[inline]
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// Iterator over the matches of a [`Query`] in a borrowed world.
pub struct QueryIter<'w, W> {
    cursor: QueryCursor<W>,
    world: &'w W,
}

impl<W> Clone for QueryIter<'_, W> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            world: self.world,
        }
    }
}

impl<W: EcsWorld> Iterator for QueryIter<'_, W> {
    type Item = Entity;

    #[inline]
    fn next(&mut self) -> Option<Entity> {
        self.cursor.advance(self.world)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.world.capacity().saturating_sub(self.cursor.position());
        (0, Some(remaining))
    }
}

impl<W: EcsWorld> FusedIterator for QueryIter<'_, W> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare_world;

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Pos {
        x: i32,
    }

    declare_world! {
        struct Grid {
            components {
                a: (),
                b: (),
                c: (),
                pos: Pos,
                link: Entity,
            }
        }
        presence mod has;
    }

    fn ids(entities: &[Entity]) -> Vec<u32> {
        entities.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn test_two_term_query() {
        let mut world = Grid::new(8);
        for id in [0, 2, 4] {
            world.a.set(Entity::new(id), ()).unwrap();
        }
        for id in [2, 4, 6] {
            world.b.set(Entity::new(id), ()).unwrap();
        }

        let query = Query::two(has::a, has::b);
        assert_eq!(ids(&query.collect(&world)), vec![2, 4]);
        assert_eq!(query.count(&world), 2);
        assert_eq!(query.first(&world), Some(Entity::new(2)));
        assert_eq!(query.arity(), 2);
    }

    #[test]
    fn test_one_and_three_terms() {
        let mut world = Grid::new(6);
        for id in 0..6 {
            let e = Entity::new(id);
            world.a.set(e, ()).unwrap();
            if id % 2 == 0 {
                world.b.set(e, ()).unwrap();
            }
            if id % 3 == 0 {
                world.c.set(e, ()).unwrap();
            }
        }

        assert_eq!(Query::one(has::a).count(&world), 6);
        let all = Query::three(has::a, has::b, has::c);
        assert_eq!(ids(&all.collect(&world)), vec![0]);
    }

    #[test]
    fn test_matches_any_population() {
        // Exhaustive over every presence pattern of a 6-slot world.
        for mask_a in 0u32..64 {
            let mask_b = (mask_a.rotate_left(3) & 63) ^ 0b10_1010;
            let mut world = Grid::new(6);
            for id in 0..6 {
                if mask_a & (1 << id) != 0 {
                    world.a.set(Entity::new(id), ()).unwrap();
                }
                if mask_b & (1 << id) != 0 {
                    world.b.set(Entity::new(id), ()).unwrap();
                }
            }

            let expected: Vec<u32> = (0..6)
                .filter(|id| mask_a & mask_b & (1 << id) != 0)
                .collect();
            let got = ids(&Query::two(has::a, has::b).collect(&world));
            assert_eq!(got, expected, "mask_a={mask_a:06b} mask_b={mask_b:06b}");
        }
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut world = Grid::new(4);
        world.a.set(Entity::new(1), ()).unwrap();
        world.a.set(Entity::new(3), ()).unwrap();

        let query = Query::one(has::a);
        let mut iter = query.iter(&world);
        assert_eq!(iter.next(), Some(Entity::new(1)));

        let resumed = iter.clone();
        assert_eq!(resumed.collect::<Vec<_>>(), vec![Entity::new(3)]);
        assert_eq!(query.iter(&world).count(), 2);
        assert_eq!(iter.next(), Some(Entity::new(3)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_for_each_sees_later_presence_changes() {
        let mut world = Grid::new(6);
        for id in [0, 2, 3, 5] {
            world.a.set(Entity::new(id), ()).unwrap();
        }

        let mut visited = Vec::new();
        Query::one(has::a).for_each(&mut world, |w, e| {
            visited.push(e.id());
            if e.id() == 0 {
                // Drop a later match and add a new one further on.
                w.a.clear(Entity::new(3)).unwrap();
                w.a.set(Entity::new(4), ()).unwrap();
            }
        });
        assert_eq!(visited, vec![0, 2, 4, 5]);
    }

    #[test]
    fn test_for_each_ignores_earlier_additions() {
        let mut world = Grid::new(4);
        world.a.set(Entity::new(2), ()).unwrap();

        let mut visited = Vec::new();
        Query::one(has::a).for_each(&mut world, |w, e| {
            visited.push(e.id());
            w.a.set(Entity::new(0), ()).unwrap();
        });
        assert_eq!(visited, vec![2]);
        assert!(world.a.has(Entity::new(0)));
    }

    #[test]
    fn test_try_for_each_stops_on_error() {
        let mut world = Grid::new(4);
        for id in 0..4 {
            world.a.set(Entity::new(id), ()).unwrap();
        }

        let mut visited = 0;
        let result: Result<(), u32> = Query::one(has::a).try_for_each(&mut world, |_, e| {
            visited += 1;
            if e.id() == 1 {
                Err(e.id())
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err(1));
        assert_eq!(visited, 2);
    }

    fn pull_followers(world: &mut Grid, leader: Entity) {
        let Some(&lead_pos) = world.pos.get(leader) else {
            return;
        };
        Query::two(has::pos, has::link).for_each(world, |w, e| {
            if w.link.get(e) == Some(&leader) {
                pull_followers(w, e);
                w.pos.set(e, lead_pos).unwrap();
            }
        });
    }

    #[test]
    fn test_reentrant_chain_update() {
        let mut world = Grid::new(8);
        let head = world.create_entity().unwrap();
        let mid = world.create_entity().unwrap();
        let tail = world.create_entity().unwrap();
        world.pos.set(head, Pos { x: 10 }).unwrap();
        world.pos.set(mid, Pos { x: 9 }).unwrap();
        world.pos.set(tail, Pos { x: 8 }).unwrap();
        world.link.set(mid, head).unwrap();
        world.link.set(tail, mid).unwrap();

        pull_followers(&mut world, head);
        world.pos.set(head, Pos { x: 11 }).unwrap();

        assert_eq!(world.pos.get(head), Some(&Pos { x: 11 }));
        assert_eq!(world.pos.get(mid), Some(&Pos { x: 10 }));
        assert_eq!(world.pos.get(tail), Some(&Pos { x: 9 }));
    }

    #[test]
    fn test_cursor_manual_loop() {
        let mut world = Grid::new(5);
        for id in [1, 3] {
            world.pos.set(Entity::new(id), Pos { x: 0 }).unwrap();
        }

        let mut cursor = Query::one(has::pos).cursor();
        while let Some(e) = cursor.advance(&world) {
            if let Some(p) = world.pos.get_mut(e) {
                p.x += 1;
            }
        }
        assert_eq!(cursor.position(), 5);
        assert_eq!(world.pos.iter().map(|(_, p)| p.x).sum::<i32>(), 2);

        cursor.reset();
        assert_eq!(cursor.advance(&world), Some(Entity::new(1)));
    }
}
