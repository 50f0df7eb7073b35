//! # ECS Error Types
//!
//! Precondition violations surfaced by entity and component operations.
//! None of them are retried inside the core.

use thiserror::Error;

use crate::ecs::Entity;

/// Errors that can occur in the ECS runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// Every id is issued and none has been destroyed.
    #[error("entity capacity exhausted: all {capacity} ids are in use")]
    CapacityExhausted {
        /// Maximum number of entities.
        capacity: usize,
    },

    /// An entity id does not fit the world's arrays.
    #[error("entity {entity} out of range: capacity is {capacity}")]
    EntityOutOfRange {
        /// The offending id.
        entity: Entity,
        /// Maximum number of entities.
        capacity: usize,
    },

    /// A checked read found no component attached.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        /// The entity that was read.
        entity: Entity,
        /// Type name of the component.
        component: &'static str,
    },

    /// Destroy was called with an id that `create` never returned.
    #[error("entity {entity} was never issued")]
    NeverIssued {
        /// The offending id.
        entity: Entity,
    },

    /// Destroy was called with an id that is already on the free list.
    #[error("entity {entity} is already destroyed")]
    AlreadyFree {
        /// The offending id.
        entity: Entity,
    },

    /// Invalid world configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
