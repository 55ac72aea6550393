//! Placeable sources
//!
//! A [`Source`] is one unit of placeable information: a class field, an
//! accessor method, or a declaration-bound construct. Identity is fixed at
//! construction; mutable placement state is carried by adaptations the
//! engine attaches while working.

use crate::adaptation::AdaptationMap;
use crate::targets::TargetId;
use dialogforge_common::{naming, ordering};

/// Handle to a source inside a members registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceId(pub(crate) usize);

/// What kind of class member a source was built from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// A class field
    Field,
    /// A getter-style accessor method
    Accessor,
    /// A construct bound to the class declaration itself
    Declared,
}

/// One placeable unit of information
#[derive(Debug)]
pub struct Source {
    name: String,
    kind: SourceKind,
    rank: i64,
    declaration_index: usize,
    node_name: String,
    adaptations: AdaptationMap,
}

impl Source {
    /// Create a source from a declared member name
    ///
    /// The node name is the member name with any accessor prefix stripped.
    #[must_use]
    pub fn new(name: &str, kind: SourceKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            rank: ordering::DEFAULT_RANK,
            declaration_index: 0,
            node_name: naming::strip_accessor_prefix(name),
            adaptations: AdaptationMap::new(),
        }
    }

    /// Set the declared ordering rank
    #[must_use]
    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = rank;
        self
    }

    /// Attach an explicit placement directive naming a target section
    #[must_use]
    pub fn with_place(mut self, section: &str) -> Self {
        self.adaptations.attach(PlaceSetting::new(section));
        self
    }

    /// Declared member name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member kind
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Declared ordering rank
    #[must_use]
    pub fn rank(&self) -> i64 {
        self.rank
    }

    /// Position among the registered members, assigned by the registry
    #[must_use]
    pub fn declaration_index(&self) -> usize {
        self.declaration_index
    }

    pub(crate) fn set_declaration_index(&mut self, index: usize) {
        self.declaration_index = index;
    }

    /// Name this source's container node will be keyed by
    #[must_use]
    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    /// Override the node name; used by the collision solver
    pub fn set_node_name(&mut self, name: impl Into<String>) {
        self.node_name = name.into();
    }

    /// View a typed aspect of this source, if present
    #[must_use]
    pub fn adapt_to<T: std::any::Any>(&self) -> Option<&T> {
        self.adaptations.adapt_to::<T>()
    }

    /// Mutable view of a typed aspect of this source, if present
    pub fn adapt_to_mut<T: std::any::Any>(&mut self) -> Option<&mut T> {
        self.adaptations.adapt_to_mut::<T>()
    }

    /// Attach a typed aspect to this source
    pub fn attach<T: std::any::Any>(&mut self, aspect: T) {
        self.adaptations.attach(aspect);
    }

    /// The explicit placement directive value, if one was declared
    #[must_use]
    pub fn place_value(&self) -> Option<&str> {
        self.adapt_to::<PlaceSetting>().map(PlaceSetting::value)
    }
}

/// Placement directive aspect
///
/// Records the author-specified target section and, once the member has
/// been provisionally placed, the node it currently renders under.
#[derive(Debug)]
pub struct PlaceSetting {
    value: String,
    matching_target: Option<TargetId>,
}

impl PlaceSetting {
    /// Create a directive pointing at the named section
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            matching_target: None,
        }
    }

    /// The requested section title
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The node this member currently renders under, if provisionally placed
    #[must_use]
    pub fn matching_target(&self) -> Option<TargetId> {
        self.matching_target
    }

    /// Record the node of a provisional placement
    pub fn set_matching_target(&mut self, target: TargetId) {
        self.matching_target = Some(target);
    }

    /// Forget the provisional placement
    pub fn clear_matching_target(&mut self) {
        self.matching_target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_name_strips_accessor_prefix() {
        let field = Source::new("title", SourceKind::Field);
        let accessor = Source::new("getTitle", SourceKind::Accessor);
        assert_eq!(field.node_name(), "title");
        assert_eq!(accessor.node_name(), "title");
        assert_eq!(accessor.name(), "getTitle");
    }

    #[test]
    fn test_place_value() {
        let plain = Source::new("title", SourceKind::Field);
        let placed = Source::new("title", SourceKind::Field).with_place("Main Tab");
        assert!(plain.place_value().is_none());
        assert_eq!(placed.place_value(), Some("Main Tab"));
    }

    #[test]
    fn test_place_setting_target_roundtrip() {
        let mut source = Source::new("title", SourceKind::Field).with_place("Main Tab");
        let setting = source.adapt_to_mut::<PlaceSetting>().unwrap();
        assert!(setting.matching_target().is_none());
    }
}
