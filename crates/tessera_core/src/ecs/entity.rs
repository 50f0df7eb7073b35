//! # Entity Management
//!
//! Entities are bare indices into component arrays. They carry no data and
//! no generation counter: liveness is whatever the owning world says it is.
//!
//! The [`EntityManager`] hands out ids from two pools:
//! - ids that were destroyed and pushed onto the free list (reused LIFO)
//! - ids that have never been issued (`next_entity..capacity`)

use std::fmt;

use crate::config::WorldConfig;
use crate::error::{EcsError, EcsResult};

/// Identifier of an entity.
///
/// The value is the direct index into every component array of a world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// Sentinel that never refers to a slot in any world.
    pub const INVALID: Self = Self(u32::MAX);

    /// Wraps a raw index.
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the id as an array index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Checks whether this is the [`Entity::INVALID`] sentinel.
    #[inline]
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<Entity> for usize {
    fn from(entity: Entity) -> Self {
        entity.index()
    }
}

/// Allocator for entity ids within a fixed capacity.
///
/// All memory is reserved at construction; `create` and `destroy` never
/// allocate.
///
/// # Example
///
/// ```rust
/// use tessera_core::EntityManager;
///
/// let mut em = EntityManager::new(8);
/// let a = em.create()?;
/// let b = em.create()?;
/// em.destroy(a)?;
/// assert_eq!(em.create()?, a);
/// # let _ = b;
/// # Ok::<(), tessera_core::EcsError>(())
/// ```
#[derive(Clone, Debug)]
pub struct EntityManager {
    /// Smallest id never issued.
    next_entity: u32,
    /// Stack of destroyed ids. Only `free_list[..free_count]` is meaningful.
    free_list: Box<[Entity]>,
    /// Per-id flag set while the id sits on the free list.
    is_free: Box<[bool]>,
    /// Number of ids currently on the free list.
    free_count: usize,
    /// Maximum number of ids.
    capacity: usize,
}

impl EntityManager {
    /// Creates a manager able to issue `capacity` distinct ids.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or does not fit in a `u32`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            capacity < u32::MAX as usize,
            "Capacity must leave room for Entity::INVALID"
        );

        Self {
            next_entity: 0,
            free_list: vec![Entity::INVALID; capacity].into_boxed_slice(),
            is_free: vec![false; capacity].into_boxed_slice(),
            free_count: 0,
            capacity,
        }
    }

    /// Creates a manager sized by a validated [`WorldConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured capacity is unusable.
    pub fn with_config(config: &WorldConfig) -> EcsResult<Self> {
        config.validate()?;
        Ok(Self::new(config.max_entities))
    }

    /// Returns the maximum number of ids this manager can issue.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the smallest id that has never been issued.
    #[inline]
    #[must_use]
    pub const fn next_entity(&self) -> u32 {
        self.next_entity
    }

    /// Returns the number of destroyed ids waiting for reuse.
    #[inline]
    #[must_use]
    pub const fn free_count(&self) -> usize {
        self.free_count
    }

    /// Returns the number of ids ever issued (live or free).
    #[inline]
    #[must_use]
    pub const fn issued(&self) -> usize {
        self.next_entity as usize
    }

    /// Returns the number of issued ids not on the free list.
    #[inline]
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.issued() - self.free_count
    }

    /// Allocates an id.
    ///
    /// The most recently destroyed id is reused first. Otherwise the
    /// smallest never-issued id is returned.
    ///
    /// # Errors
    ///
    /// [`EcsError::CapacityExhausted`] when every id is issued and none is free.
    pub fn create(&mut self) -> EcsResult<Entity> {
        if self.free_count > 0 {
            self.free_count -= 1;
            let entity = self.free_list[self.free_count];
            self.is_free[entity.index()] = false;
            tracing::debug!("recycled entity {}", entity);
            return Ok(entity);
        }

        if self.issued() == self.capacity {
            tracing::warn!("entity capacity {} exhausted", self.capacity);
            return Err(EcsError::CapacityExhausted {
                capacity: self.capacity,
            });
        }

        let entity = Entity::new(self.next_entity);
        self.next_entity += 1;
        Ok(entity)
    }

    /// Checks whether `entity` is issued and not already free.
    #[inline]
    #[must_use]
    pub fn is_live(&self, entity: Entity) -> bool {
        self.check_destroy(entity).is_ok()
    }

    /// Checks that `destroy` would accept `entity`, without changing state.
    ///
    /// # Errors
    ///
    /// Same as [`destroy`](Self::destroy).
    pub fn check_destroy(&self, entity: Entity) -> EcsResult<()> {
        if entity.index() >= self.capacity {
            return Err(EcsError::EntityOutOfRange {
                entity,
                capacity: self.capacity,
            });
        }

        if entity.id() >= self.next_entity {
            return Err(EcsError::NeverIssued { entity });
        }

        if self.is_free[entity.index()] {
            return Err(EcsError::AlreadyFree { entity });
        }

        Ok(())
    }

    /// Returns an id to the free list.
    ///
    /// Component state is not touched; clear it first (see
    /// [`EcsWorld::destroy_entity`](crate::EcsWorld::destroy_entity)).
    ///
    /// # Errors
    ///
    /// - [`EcsError::EntityOutOfRange`] if the id is beyond capacity.
    /// - [`EcsError::NeverIssued`] if the id was never returned by `create`.
    /// - [`EcsError::AlreadyFree`] if the id was destroyed and not handed
    ///   out again since.
    ///
    /// A rejected id leaves the manager unchanged.
    pub fn destroy(&mut self, entity: Entity) -> EcsResult<()> {
        if let Err(err) = self.check_destroy(entity) {
            tracing::warn!("rejected destroy of {}: {}", entity, err);
            return Err(err);
        }

        // Every free id is distinct and issued, so the stack cannot overflow.
        self.free_list[self.free_count] = entity;
        self.free_count += 1;
        self.is_free[entity.index()] = true;
        Ok(())
    }

    /// Returns every id to the unissued pool.
    pub fn reset(&mut self) {
        self.next_entity = 0;
        self.free_count = 0;
        self.is_free.fill(false);
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_ENTITIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sequential() {
        let mut em = EntityManager::new(4);
        for expected in 0..4 {
            assert_eq!(em.create().unwrap(), Entity::new(expected));
        }
        assert_eq!(em.next_entity(), 4);
    }

    #[test]
    fn test_recycle_is_lifo() {
        let mut em = EntityManager::new(8);
        for _ in 0..4 {
            em.create().unwrap();
        }

        em.destroy(Entity::new(1)).unwrap();
        em.destroy(Entity::new(3)).unwrap();
        assert_eq!(em.free_count(), 2);

        assert_eq!(em.create().unwrap(), Entity::new(3));
        assert_eq!(em.create().unwrap(), Entity::new(1));
        assert_eq!(em.create().unwrap(), Entity::new(4));
    }

    #[test]
    fn test_capacity_exhausted() {
        let mut em = EntityManager::new(2);
        em.create().unwrap();
        em.create().unwrap();

        assert_eq!(
            em.create(),
            Err(EcsError::CapacityExhausted { capacity: 2 })
        );
        // A failed create leaves the manager untouched.
        assert_eq!(em.next_entity(), 2);
    }

    #[test]
    fn test_destroy_rejects_unknown_ids() {
        let mut em = EntityManager::new(4);
        em.create().unwrap();

        assert_eq!(
            em.destroy(Entity::new(9)),
            Err(EcsError::EntityOutOfRange {
                entity: Entity::new(9),
                capacity: 4,
            })
        );
        assert_eq!(
            em.destroy(Entity::new(2)),
            Err(EcsError::NeverIssued {
                entity: Entity::new(2)
            })
        );
        assert_eq!(em.free_count(), 0);
    }

    #[test]
    fn test_double_destroy_rejected() {
        let mut em = EntityManager::new(4);
        let a = em.create().unwrap();

        em.destroy(a).unwrap();
        assert!(!em.is_live(a));
        assert_eq!(em.destroy(a), Err(EcsError::AlreadyFree { entity: a }));
        assert_eq!(em.free_count(), 1);

        // The id comes back once, then fresh ids follow.
        let x = em.create().unwrap();
        let y = em.create().unwrap();
        assert_eq!(x, a);
        assert_ne!(x, y);
        assert!(em.is_live(x));

        // Handed out again, it can be destroyed again.
        em.destroy(x).unwrap();
        assert_eq!(em.create().unwrap(), a);
    }

    #[test]
    fn test_check_destroy_leaves_state() {
        let mut em = EntityManager::new(4);
        let a = em.create().unwrap();

        assert_eq!(em.check_destroy(a), Ok(()));
        assert_eq!(
            em.check_destroy(Entity::new(3)),
            Err(EcsError::NeverIssued {
                entity: Entity::new(3)
            })
        );
        assert_eq!(em.free_count(), 0);
        assert!(em.is_live(a));
    }

    #[test]
    fn test_live_count_and_reset() {
        let mut em = EntityManager::new(4);
        let a = em.create().unwrap();
        em.create().unwrap();
        em.destroy(a).unwrap();
        assert_eq!(em.live_count(), 1);

        em.reset();
        assert_eq!(em.live_count(), 0);
        assert_eq!(em.create().unwrap(), Entity::new(0));
    }

    #[test]
    fn test_entity_display_and_sentinel() {
        assert_eq!(Entity::new(7).to_string(), "#7");
        assert!(Entity::INVALID.is_invalid());
        assert!(!Entity::new(0).is_invalid());
    }
}
