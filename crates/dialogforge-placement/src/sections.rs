//! Container sections
//!
//! A section is one declared subdivision of a dialog container (a tab or
//! accordion panel). It knows which members were statically bound to it,
//! which candidate members it accepts, and how to materialize its items
//! container in the output tree.

use crate::sources::{Source, SourceId, SourceKind};
use crate::targets::{TargetId, TargetTree, NN_ITEMS};
use dialogforge_common::naming;

/// One declared dialog section
#[derive(Debug)]
pub struct Section {
    title: String,
    sources: Vec<SourceId>,
    accepted_kinds: Option<Vec<SourceKind>>,
}

impl Section {
    /// Create a section with the given title
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sources: Vec::new(),
            accepted_kinds: None,
        }
    }

    /// Bind members to this section by declaration
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<SourceId>) -> Self {
        self.sources = sources;
        self
    }

    /// Restrict which member kinds this section accepts; unrestricted by
    /// default
    #[must_use]
    pub fn with_accepted_kinds(mut self, kinds: Vec<SourceKind>) -> Self {
        self.accepted_kinds = Some(kinds);
        self
    }

    /// Section title as declared
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Members statically bound to this section
    #[must_use]
    pub fn sources(&self) -> &[SourceId] {
        &self.sources
    }

    /// Test whether a candidate member may be placed into this section
    ///
    /// A member with an explicit placement directive matches when the
    /// directive names this section's title. Directive-less members match
    /// only under the relaxed policy granted to the first declared section.
    #[must_use]
    pub fn can_contain(&self, source: &Source, relaxed: bool) -> bool {
        if let Some(kinds) = &self.accepted_kinds {
            if !kinds.contains(&source.kind()) {
                return false;
            }
        }
        match source.place_value() {
            Some(value) if !value.is_empty() => value == self.title,
            _ => relaxed,
        }
    }

    /// Fetch or create this section's `items` container under `parent`
    pub fn items_container(&self, tree: &mut TargetTree, parent: TargetId) -> TargetId {
        let section_node = tree.get_or_create_child(parent, &naming::to_node_name(&self.title));
        tree.get_or_create_child(section_node, NN_ITEMS)
    }
}
