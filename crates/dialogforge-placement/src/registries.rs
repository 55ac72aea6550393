//! Placement registries
//!
//! [`MembersRegistry`] partitions the placeable sources of one generation
//! unit into available, soft-checked-out, and checked-out members; each
//! entry carries exactly one state tag, so the states are mutually
//! exclusive by construction. [`SectionsRegistry`] holds the declared
//! sections in order plus the titles excluded from rendering.

use crate::sections::Section;
use crate::sources::{Source, SourceId};
use dialogforge_common::ordering;
use std::collections::HashSet;

/// Lifecycle state of a registered member
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberState {
    /// Eligible for placement
    Available,
    /// Provisionally placed in a flat container; still visible to a more
    /// specific placement pass
    SoftCheckedOut,
    /// Permanently placed or excluded
    CheckedOut,
}

#[derive(Debug)]
struct Entry {
    source: Source,
    state: MemberState,
}

/// Registry of placeable members for one placement request
#[derive(Debug)]
pub struct MembersRegistry {
    entries: Vec<Entry>,
}

impl MembersRegistry {
    /// Register members, assigning declaration indices and sorting by
    /// `(rank, declaration index)`
    #[must_use]
    pub fn new(sources: Vec<Source>) -> Self {
        let mut sources = sources;
        for (index, source) in sources.iter_mut().enumerate() {
            source.set_declaration_index(index);
        }
        ordering::sort_by_rank(&mut sources, |source| {
            (source.rank(), source.declaration_index())
        });
        let entries = sources
            .into_iter()
            .map(|source| Entry {
                source,
                state: MemberState::Available,
            })
            .collect();
        Self { entries }
    }

    /// Number of registered members, in any state
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no members are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every registered member id in registry order
    pub fn ids(&self) -> impl Iterator<Item = SourceId> + '_ {
        (0..self.entries.len()).map(SourceId)
    }

    /// The source behind an id
    #[must_use]
    pub fn source(&self, id: SourceId) -> &Source {
        &self.entries[id.0].source
    }

    /// Mutable access to the source behind an id
    pub fn source_mut(&mut self, id: SourceId) -> &mut Source {
        &mut self.entries[id.0].source
    }

    /// Look up a member by its declared name
    ///
    /// Used by callers wiring pre-declared section membership.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<SourceId> {
        self.entries
            .iter()
            .position(|entry| entry.source.name() == name)
            .map(SourceId)
    }

    /// Current state of a member
    #[must_use]
    pub fn state(&self, id: SourceId) -> MemberState {
        self.entries[id.0].state
    }

    /// Check whether a member has been permanently checked out
    #[must_use]
    pub fn is_checked_out(&self, id: SourceId) -> bool {
        self.state(id) == MemberState::CheckedOut
    }

    /// Ordered ids of members still eligible for placement
    #[must_use]
    pub fn available(&self) -> Vec<SourceId> {
        self.ids_in_states(&[MemberState::Available])
    }

    /// The first still-available member, if any
    #[must_use]
    pub fn first_available(&self) -> Option<SourceId> {
        self.entries
            .iter()
            .position(|entry| entry.state == MemberState::Available)
            .map(SourceId)
    }

    /// Ordered ids of available plus soft-checked-out members, for a more
    /// specific matching pass that may still claim provisional placements
    #[must_use]
    pub fn all_available(&self) -> Vec<SourceId> {
        self.ids_in_states(&[MemberState::Available, MemberState::SoftCheckedOut])
    }

    /// Permanently remove a member from placement consideration
    pub fn check_out(&mut self, id: SourceId) {
        self.entries[id.0].state = MemberState::CheckedOut;
    }

    /// Move a member to the provisional state: placed for now, but still
    /// claimable by a later section
    pub fn soft_check_out(&mut self, id: SourceId) {
        if self.entries[id.0].state == MemberState::Available {
            self.entries[id.0].state = MemberState::SoftCheckedOut;
        }
    }

    /// Return a soft-checked-out member to availability for another pass
    pub fn restore(&mut self, id: SourceId) {
        if self.entries[id.0].state == MemberState::SoftCheckedOut {
            self.entries[id.0].state = MemberState::Available;
        }
    }

    fn ids_in_states(&self, states: &[MemberState]) -> Vec<SourceId> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| states.contains(&entry.state))
            .map(|(index, _)| SourceId(index))
            .collect()
    }
}

/// Registry of declared sections for one placement request
#[derive(Debug)]
pub struct SectionsRegistry {
    sections: Vec<Section>,
    ignored: HashSet<String>,
}

impl SectionsRegistry {
    /// Register the declared sections and the titles excluded from
    /// rendering
    #[must_use]
    pub fn new(sections: Vec<Section>, ignored: Vec<String>) -> Self {
        Self {
            sections,
            ignored: ignored.into_iter().collect(),
        }
    }

    /// Declared sections in declaration order
    ///
    /// Ignored sections are included: their members must still be checked
    /// out during iteration even though nothing is rendered for them.
    #[must_use]
    pub fn available(&self) -> &[Section] {
        &self.sections
    }

    /// Titles of sections excluded from rendering
    #[must_use]
    pub fn ignored(&self) -> &HashSet<String> {
        &self.ignored
    }

    /// Check whether the named section is excluded from rendering
    #[must_use]
    pub fn is_ignored(&self, title: &str) -> bool {
        self.ignored.contains(title)
    }
}
