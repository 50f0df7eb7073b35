//! # ECS World
//!
//! A world is a plain struct owning one [`EntityManager`] and one
//! [`ComponentStorage`](super::ComponentStorage) per component type, plus any
//! application scalars. Worlds are independent values: several can coexist
//! and none is a process-wide singleton.
//!
//! Component types are declared with [`declare_world!`](crate::declare_world),
//! which expands to the struct, its constructors, the [`EcsWorld`] impl and a
//! module of presence accessors used to build queries.

use super::entity::{Entity, EntityManager};
use crate::error::EcsResult;

/// Access to the entity bookkeeping of a world.
///
/// Implemented by [`declare_world!`](crate::declare_world); hand-written
/// implementations must clear every component storage in
/// [`clear_components`](EcsWorld::clear_components).
pub trait EcsWorld {
    /// Returns the id allocator.
    fn entities(&self) -> &EntityManager;

    /// Returns the id allocator mutably.
    fn entities_mut(&mut self) -> &mut EntityManager;

    /// Detaches every component from `entity`.
    ///
    /// # Errors
    ///
    /// Fails if the id is beyond capacity.
    fn clear_components(&mut self, entity: Entity) -> EcsResult<()>;

    /// Returns the fixed entity capacity.
    #[inline]
    fn capacity(&self) -> usize {
        self.entities().capacity()
    }

    /// Allocates an entity id. No component is attached.
    ///
    /// # Errors
    ///
    /// Fails when the capacity is exhausted.
    #[inline]
    fn create_entity(&mut self) -> EcsResult<Entity> {
        self.entities_mut().create()
    }

    /// Clears every component of `entity`, then recycles its id.
    ///
    /// # Errors
    ///
    /// Fails if the id is out of range, was never issued, or is already
    /// destroyed. Nothing is cleared when the id is rejected.
    fn destroy_entity(&mut self, entity: Entity) -> EcsResult<()> {
        self.entities().check_destroy(entity)?;
        self.clear_components(entity)?;
        self.entities_mut().destroy(entity)
    }
}

/// Declares a world struct with fixed-capacity component storages.
///
/// Each entry under `components` becomes a
/// [`ComponentStorage`](crate::ComponentStorage) field, each entry under
/// `resources` a plain field initialized with `Default`. The named presence
/// module gets one accessor per component, usable as a query term.
///
/// # Example
///
/// ```rust
/// use tessera_core::{declare_world, EcsResult, EcsWorld, Query};
///
/// declare_world! {
///     /// A tiny world.
///     pub struct Arena {
///         components {
///             /// Hit points.
///             pub health: i32,
///             /// Whether the entity is hostile.
///             pub hostile: (),
///         }
///         resources {
///             /// Turn counter.
///             pub turn: u32,
///         }
///     }
///     presence mod has;
/// }
///
/// fn main() -> EcsResult<()> {
///     let mut arena = Arena::new(16);
///     let e = arena.create_entity()?;
///     arena.health.set(e, 10)?;
///     arena.hostile.set(e, ())?;
///
///     let hostiles = Query::two(has::health, has::hostile);
///     assert_eq!(hostiles.collect(&arena), vec![e]);
///
///     arena.destroy_entity(e)?;
///     assert!(!arena.health.has(e));
///     arena.turn += 1;
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! declare_world {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            components {
                $( $(#[$cmeta:meta])* $cvis:vis $comp:ident : $cty:ty ),* $(,)?
            }
            $( resources {
                $( $(#[$rmeta:meta])* $rvis:vis $res:ident : $rty:ty ),* $(,)?
            } )?
        }
        presence mod $pmod:ident;
    ) => {
        $(#[$meta])*
        $vis struct $name {
            /// Entity id allocator.
            pub entities: $crate::EntityManager,
            $( $(#[$cmeta])* $cvis $comp: $crate::ComponentStorage<$cty>, )*
            $( $( $(#[$rmeta])* $rvis $res: $rty, )* )?
        }

        #[allow(dead_code)]
        impl $name {
            /// Creates an empty world with room for `capacity` entities.
            ///
            /// # Panics
            ///
            /// Panics if capacity is zero.
            #[must_use]
            $vis fn new(capacity: usize) -> Self {
                Self {
                    entities: $crate::EntityManager::new(capacity),
                    $( $comp: $crate::ComponentStorage::new(capacity), )*
                    $( $( $res: ::core::default::Default::default(), )* )?
                }
            }

            /// Creates an empty world sized by `config`.
            ///
            /// # Errors
            ///
            /// Fails if the configured capacity is unusable.
            $vis fn with_config(config: &$crate::WorldConfig) -> $crate::EcsResult<Self> {
                config.validate()?;
                Ok(Self::new(config.max_entities))
            }
        }

        impl $crate::EcsWorld for $name {
            #[inline]
            fn entities(&self) -> &$crate::EntityManager {
                &self.entities
            }

            #[inline]
            fn entities_mut(&mut self) -> &mut $crate::EntityManager {
                &mut self.entities
            }

            fn clear_components(&mut self, entity: $crate::Entity) -> $crate::EcsResult<()> {
                $( self.$comp.clear(entity)?; )*
                Ok(())
            }
        }

        #[doc = concat!("Presence accessors for the components of [`", stringify!($name), "`].")]
        #[allow(dead_code)]
        $vis mod $pmod {
            $(
                #[doc = concat!("Presence flags of `", stringify!($comp), "`.")]
                #[inline]
                #[must_use]
                pub fn $comp(world: &super::$name) -> &[bool] {
                    world.$comp.presence()
                }
            )*
        }
    };
}
