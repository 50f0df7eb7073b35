//! # Component System
//!
//! Components are plain data with no behavior. Storage slots are filled
//! with the default value up front, so every component must be `Copy` and
//! `Default`.

/// Marker trait for ECS components.
///
/// Blanket-implemented for every `Copy + Default + 'static` type, so a
/// component needs no registration beyond a storage field in its world.
///
/// # Example
///
/// ```rust
/// use tessera_core::{Component, ComponentStorage};
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq)]
/// struct Health(i32);
///
/// let storage: ComponentStorage<Health> = ComponentStorage::new(16);
/// assert_eq!(storage.capacity(), 16);
/// # fn assert_component<C: Component>() {}
/// # assert_component::<Health>();
/// ```
pub trait Component: Copy + Default + 'static {
    /// Human-readable name used in error messages.
    #[inline]
    #[must_use]
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<T: Copy + Default + 'static> Component for T {}
