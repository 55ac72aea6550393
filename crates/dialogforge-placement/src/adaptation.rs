//! Typed adaptation capability
//!
//! A source can expose optional typed "aspects" (for example a placement
//! directive) without the engine inspecting its concrete shape. Aspects are
//! looked up by type; absent aspects are simply `None`.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Map of typed aspects attached to a source
#[derive(Default)]
pub struct AdaptationMap {
    entries: HashMap<TypeId, Box<dyn Any>>,
}

impl AdaptationMap {
    /// Create an empty adaptation map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an aspect, replacing any previous aspect of the same type
    pub fn attach<T: Any>(&mut self, aspect: T) {
        self.entries.insert(TypeId::of::<T>(), Box::new(aspect));
    }

    /// View the aspect of the given type, if attached
    #[must_use]
    pub fn adapt_to<T: Any>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|aspect| aspect.downcast_ref::<T>())
    }

    /// Mutable view of the aspect of the given type, if attached
    pub fn adapt_to_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|aspect| aspect.downcast_mut::<T>())
    }

    /// Check whether an aspect of the given type is attached
    #[must_use]
    pub fn has<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }
}

impl std::fmt::Debug for AdaptationMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptationMap")
            .field("aspects", &self.entries.len())
            .finish()
    }
}
