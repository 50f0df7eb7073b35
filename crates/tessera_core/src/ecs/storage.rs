//! # Component Storage
//!
//! Pre-allocated storage for one component type: a value array and a
//! presence array of the same length, both indexed directly by entity id.
//!
//! - All slots are allocated at creation
//! - Access is O(1) via entity index
//! - A value is only readable while its presence flag is set

use super::component::Component;
use super::entity::Entity;
use crate::error::{EcsError, EcsResult};

/// Fixed-capacity storage for a single component type.
///
/// Clearing a component only drops its presence flag; the stale value stays
/// in place and is unreachable through the public API.
///
/// # Example
///
/// ```rust
/// use tessera_core::{ComponentStorage, Entity};
///
/// let mut speeds: ComponentStorage<f32> = ComponentStorage::new(8);
/// let e = Entity::new(3);
///
/// speeds.set(e, 1.5)?;
/// assert_eq!(speeds.get(e), Some(&1.5));
///
/// speeds.clear(e)?;
/// assert!(speeds.get(e).is_none());
/// # Ok::<(), tessera_core::EcsError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ComponentStorage<C: Component> {
    /// Component values, valid only where `present` is set.
    values: Box<[C]>,
    /// Presence flags, one per entity id.
    present: Box<[bool]>,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates storage with room for `capacity` entities.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        Self {
            values: vec![C::default(); capacity].into_boxed_slice(),
            present: vec![false; capacity].into_boxed_slice(),
        }
    }

    /// Returns the capacity of this storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.present.len()
    }

    #[inline]
    fn check(&self, entity: Entity) -> EcsResult<usize> {
        let idx = entity.index();
        if idx < self.present.len() {
            Ok(idx)
        } else {
            Err(EcsError::EntityOutOfRange {
                entity,
                capacity: self.present.len(),
            })
        }
    }

    /// Attaches `value` to `entity`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// [`EcsError::EntityOutOfRange`] if the id exceeds capacity.
    #[inline]
    pub fn set(&mut self, entity: Entity, value: C) -> EcsResult<()> {
        let idx = self.check(entity)?;
        self.values[idx] = value;
        self.present[idx] = true;
        Ok(())
    }

    /// Checks whether `entity` currently has this component.
    ///
    /// Ids beyond capacity never have a component.
    #[inline]
    #[must_use]
    pub fn has(&self, entity: Entity) -> bool {
        self.present.get(entity.index()).copied().unwrap_or(false)
    }

    /// Detaches the component from `entity`. Clearing an absent component
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// [`EcsError::EntityOutOfRange`] if the id exceeds capacity.
    #[inline]
    pub fn clear(&mut self, entity: Entity) -> EcsResult<()> {
        let idx = self.check(entity)?;
        self.present[idx] = false;
        Ok(())
    }

    /// Detaches the component and returns the value it held, if any.
    ///
    /// # Errors
    ///
    /// [`EcsError::EntityOutOfRange`] if the id exceeds capacity.
    pub fn take(&mut self, entity: Entity) -> EcsResult<Option<C>> {
        let idx = self.check(entity)?;
        let was_present = std::mem::replace(&mut self.present[idx], false);
        Ok(was_present.then(|| self.values[idx]))
    }

    /// Gets the component of `entity`, or `None` when absent or out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&C> {
        let idx = entity.index();
        if self.has(entity) {
            self.values.get(idx)
        } else {
            None
        }
    }

    /// Gets the component of `entity` mutably, or `None` when absent.
    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        let idx = entity.index();
        if self.has(entity) {
            self.values.get_mut(idx)
        } else {
            None
        }
    }

    /// Gets the component of `entity`, failing with a descriptive error.
    ///
    /// # Errors
    ///
    /// - [`EcsError::EntityOutOfRange`] if the id exceeds capacity.
    /// - [`EcsError::MissingComponent`] if no value is attached.
    pub fn try_get(&self, entity: Entity) -> EcsResult<&C> {
        let idx = self.check(entity)?;
        if self.present[idx] {
            Ok(&self.values[idx])
        } else {
            Err(EcsError::MissingComponent {
                entity,
                component: C::name(),
            })
        }
    }

    /// Returns the presence flags, indexed by entity id.
    ///
    /// This is the layout the query engine filters on.
    #[inline]
    #[must_use]
    pub fn presence(&self) -> &[bool] {
        &self.present
    }

    /// Counts entities that have this component. O(capacity).
    #[must_use]
    pub fn count(&self) -> usize {
        self.present.iter().filter(|&&p| p).count()
    }

    /// Iterates over attached components in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &C)> + '_ {
        self.present
            .iter()
            .zip(self.values.iter())
            .enumerate()
            .filter(|&(_, (&present, _))| present)
            .map(|(idx, (_, value))| (Entity::new(idx as u32), value))
    }

    /// Detaches the component from every entity.
    ///
    /// No memory is freed or allocated.
    pub fn clear_all(&mut self) {
        self.present.fill(false);
    }
}
