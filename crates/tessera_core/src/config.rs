//! # World Configuration
//!
//! Sizing for a world, loaded once at startup (typically as a table inside
//! an application's TOML file).

use serde::{Deserialize, Serialize};

use crate::error::{EcsError, EcsResult};

/// Entity capacity used when nothing else is configured.
pub const DEFAULT_MAX_ENTITIES: usize = 1024;

/// Configuration for a world's fixed capacity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Maximum number of simultaneously issued entity ids.
    pub max_entities: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_entities: DEFAULT_MAX_ENTITIES,
        }
    }
}

impl WorldConfig {
    /// Creates a configuration with the given capacity.
    #[must_use]
    pub const fn with_capacity(max_entities: usize) -> Self {
        Self { max_entities }
    }

    /// Checks that the capacity can back a world.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidConfig`] if the capacity is zero or too large for
    /// a `u32` id.
    pub fn validate(&self) -> EcsResult<()> {
        if self.max_entities == 0 {
            return Err(EcsError::InvalidConfig(
                "max_entities must be greater than zero".into(),
            ));
        }
        if self.max_entities >= u32::MAX as usize {
            return Err(EcsError::InvalidConfig(format!(
                "max_entities {} does not fit an entity id",
                self.max_entities
            )));
        }
        Ok(())
    }
}
