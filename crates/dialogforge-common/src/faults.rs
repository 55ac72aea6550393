//! Fault-kind registry
//!
//! Fault kinds are dotted, package-qualified names arranged in a single
//! inheritance chain. The registry answers two questions for the selective
//! exception policy: does a name denote a known kind, and is one kind a
//! descendant of another. An unknown name is simply unresolved; rule
//! evaluation treats it as non-matching rather than a configuration error.

use crate::error::kinds;
use std::collections::HashMap;

/// Registry of fault kinds and their ancestry
#[derive(Clone, Debug)]
pub struct FaultRegistry {
    parents: HashMap<String, Option<String>>,
}

impl FaultRegistry {
    /// Create an empty registry with no kinds registered
    #[must_use]
    pub fn empty() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }

    /// Register a fault kind with an optional parent kind
    pub fn register(&mut self, name: impl Into<String>, parent: Option<&str>) {
        self.parents
            .insert(name.into(), parent.map(ToString::to_string));
    }

    /// Check whether the given name denotes a known fault kind
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.parents.get_key_value(name).map(|(k, _)| k.as_str())
    }

    /// Check whether `kind` is `ancestor` or one of its descendants
    ///
    /// Walks the parent chain of `kind`; an unregistered kind matches only
    /// by exact name equality.
    #[must_use]
    pub fn is_assignable(&self, kind: &str, ancestor: &str) -> bool {
        if kind == ancestor {
            return true;
        }
        let mut current = kind;
        while let Some(Some(parent)) = self.parents.get(current) {
            if parent.as_str() == ancestor {
                return true;
            }
            current = parent.as_str();
        }
        false
    }
}

impl Default for FaultRegistry {
    /// Registry pre-populated with the plugin's own fault kinds
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(kinds::ROOT, None);
        registry.register(kinds::INVALID_CONTAINER, Some(kinds::ROOT));
        registry.register(kinds::SECTION_NOT_FOUND, Some(kinds::ROOT));
        registry.register(kinds::HANDLER, Some(kinds::ROOT));
        registry.register(kinds::INVALID_SETTING, Some(kinds::ROOT));
        registry.register(kinds::INTERNAL, Some(kinds::ROOT));
        registry
    }
}
