//! Placement engine
//!
//! Distributes as many available members as possible into a container
//! node, mutating the members registry and the target tree supplied by the
//! caller. With declared sections the engine runs multi-section
//! distribution; otherwise it falls back to flat placement of the whole
//! registry. Members that genuinely cannot be placed stay available for an
//! outer or subsequent invocation; the engine is re-entrant across nested
//! containers sharing one members registry.

use crate::collision;
use crate::registries::{MembersRegistry, SectionsRegistry};
use crate::sections::Section;
use crate::sources::{PlaceSetting, Source, SourceId};
use crate::targets::{TargetId, TargetTree, NN_ITEMS};
use dialogforge_common::{ordering, Result};

/// Per-member processing chain invoked with each placed member and its
/// freshly created container node
///
/// The engine invokes the handler exactly once per member that is ever
/// placed. A provisionally placed member that is later claimed by a real
/// section keeps its populated node; the handler does not run again at
/// promotion.
pub trait MemberHandler {
    /// Populate the node created for the given member
    fn accept(&mut self, source: &Source, tree: &mut TargetTree, node: TargetId) -> Result<()>;
}

impl<F> MemberHandler for F
where
    F: FnMut(&Source, &mut TargetTree, TargetId) -> Result<()>,
{
    fn accept(&mut self, source: &Source, tree: &mut TargetTree, node: TargetId) -> Result<()> {
        self(source, tree, node)
    }
}

/// Distributes members of one generation unit into a container node
pub struct PlacementEngine<'a> {
    container: TargetId,
    members: &'a mut MembersRegistry,
    sections: Option<&'a SectionsRegistry>,
}

impl<'a> PlacementEngine<'a> {
    /// Create an engine placing into `container`
    pub fn new(container: TargetId, members: &'a mut MembersRegistry) -> Self {
        Self {
            container,
            members,
            sections: None,
        }
    }

    /// Supply the declared sections of the container
    #[must_use]
    pub fn with_sections(mut self, sections: &'a SectionsRegistry) -> Self {
        self.sections = Some(sections);
        self
    }

    /// Place as many available members as possible
    ///
    /// Empty registries are a valid "nothing to place" case and succeed
    /// without touching the tree.
    pub fn place<H>(&mut self, tree: &mut TargetTree, handler: &mut H) -> Result<()>
    where
        H: MemberHandler + ?Sized,
    {
        let sections = self.sections;
        match sections {
            Some(sections) if !sections.available().is_empty() => {
                self.place_into_sections(tree, handler, sections)
            }
            _ => self.place_remaining(tree, handler),
        }
    }

    /// Multi-section distribution over the declared sections in order
    fn place_into_sections<H>(
        &mut self,
        tree: &mut TargetTree,
        handler: &mut H,
        sections: &SectionsRegistry,
    ) -> Result<()>
    where
        H: MemberHandler + ?Sized,
    {
        for (index, section) in sections.available().iter().enumerate() {
            // The first declared section historically absorbs members
            // without an explicit placement directive
            let relaxed = index == 0;
            let slate = self.slate_for(section, relaxed);
            if sections.is_ignored(section.title()) {
                for id in slate {
                    tracing::debug!(
                        member = self.members.source(id).name(),
                        section = section.title(),
                        "member of ignored section checked out unrendered"
                    );
                    self.members.check_out(id);
                }
            } else {
                let items = section.items_container(tree, self.container);
                self.place_slate(slate, items, tree, handler)?;
            }
        }
        Ok(())
    }

    /// Merge a section's pre-declared members with the matching candidates
    fn slate_for(&self, section: &Section, relaxed: bool) -> Vec<SourceId> {
        let mut slate: Vec<SourceId> = section
            .sources()
            .iter()
            .copied()
            .filter(|id| !self.members.is_checked_out(*id))
            .collect();
        let matched: Vec<SourceId> = self
            .members
            .all_available()
            .into_iter()
            .filter(|id| {
                !slate.contains(id) && section.can_contain(self.members.source(*id), relaxed)
            })
            .collect();
        let needs_resort = !slate.is_empty() && !matched.is_empty();
        slate.extend(matched);
        if needs_resort {
            let members = &*self.members;
            ordering::sort_by_rank(&mut slate, |id| {
                let source = members.source(*id);
                (source.rank(), source.declaration_index())
            });
        }
        slate
    }

    /// Flat placement of a slate into a section's items container
    fn place_slate<H>(
        &mut self,
        mut slate: Vec<SourceId>,
        items: TargetId,
        tree: &mut TargetTree,
        handler: &mut H,
    ) -> Result<()>
    where
        H: MemberHandler + ?Sized,
    {
        collision::resolve_property_coincidences(&mut slate, self.members, tree);
        collision::resolve_collisions(&slate, self.members);

        for id in slate {
            let node_name = self.members.source(id).node_name().to_string();
            let former = self
                .members
                .source(id)
                .adapt_to::<PlaceSetting>()
                .and_then(PlaceSetting::matching_target);
            if let Some(former) = former {
                // Claimed after a provisional flat placement: move the
                // already-populated node so the tree holds no stale copy
                tree.reattach(former, items, &node_name);
                if let Some(setting) = self.members.source_mut(id).adapt_to_mut::<PlaceSetting>() {
                    setting.clear_matching_target();
                }
                tracing::debug!(member = %node_name, "promoted provisionally placed member");
            } else {
                let node = tree.get_or_create_child(items, &node_name);
                handler.accept(self.members.source(id), tree, node)?;
                tracing::debug!(member = %node_name, "placed member");
            }
            self.members.check_out(id);
        }
        Ok(())
    }

    /// Flat placement of the whole registry, used when no sections exist
    ///
    /// Members carrying an unsatisfied placement directive are rendered
    /// here as a fallback but only soft-checked-out: they stay visible to
    /// a later, more specific pass over a nested container, which will
    /// relocate their node.
    fn place_remaining<H>(&mut self, tree: &mut TargetTree, handler: &mut H) -> Result<()>
    where
        H: MemberHandler + ?Sized,
    {
        let mut slate = self.members.available();
        if slate.is_empty() {
            return Ok(());
        }
        collision::resolve_property_coincidences(&mut slate, self.members, tree);
        collision::resolve_collisions(&slate, self.members);

        let items = tree.get_or_create_child(self.container, NN_ITEMS);
        while let Some(id) = self.members.first_available() {
            let node_name = self.members.source(id).node_name().to_string();
            let node = tree.get_or_create_child(items, &node_name);
            handler.accept(self.members.source(id), tree, node)?;

            let wants_section = self
                .members
                .source(id)
                .place_value()
                .is_some_and(|value| !value.is_empty());
            if wants_section {
                self.members.soft_check_out(id);
                if let Some(setting) = self.members.source_mut(id).adapt_to_mut::<PlaceSetting>() {
                    setting.set_matching_target(node);
                }
                tracing::debug!(member = %node_name, "soft-placed member awaiting its section");
            } else {
                self.members.check_out(id);
                tracing::debug!(member = %node_name, "placed member");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registries::MemberState;
    use crate::sources::SourceKind;
    use dialogforge_common::Error;

    fn noop() -> impl FnMut(&Source, &mut TargetTree, TargetId) -> Result<()> {
        |_, _, _| Ok(())
    }

    fn labeling() -> impl FnMut(&Source, &mut TargetTree, TargetId) -> Result<()> {
        |source: &Source, tree: &mut TargetTree, node: TargetId| {
            tree.set_attribute(node, "name", source.name());
            Ok(())
        }
    }

    #[test]
    fn test_flat_placement_checks_out_plain_members() {
        let mut members = MembersRegistry::new(vec![
            Source::new("title", SourceKind::Field),
            Source::new("getDescription", SourceKind::Accessor),
        ]);
        let mut tree = TargetTree::new("dialog");
        let root = tree.root();
        PlacementEngine::new(root, &mut members)
            .place(&mut tree, &mut noop())
            .unwrap();

        assert!(members.available().is_empty());
        assert!(members.all_available().is_empty());
        let items = tree.child_by_name(root, NN_ITEMS).unwrap();
        let names: Vec<&str> = tree.child_names(items).collect();
        assert_eq!(names, vec!["title", "description"]);
    }

    #[test]
    fn test_unmatched_directive_soft_places_exactly_one_node() {
        let mut members = MembersRegistry::new(vec![
            Source::new("extra", SourceKind::Field).with_place("Never Declared")
        ]);
        let mut tree = TargetTree::new("dialog");
        let root = tree.root();
        PlacementEngine::new(root, &mut members)
            .place(&mut tree, &mut noop())
            .unwrap();

        let id = members.find_by_name("extra").unwrap();
        assert_eq!(members.state(id), MemberState::SoftCheckedOut);
        let items = tree.child_by_name(root, NN_ITEMS).unwrap();
        assert_eq!(tree.children(items).len(), 1);
        let node = tree.child_by_name(items, "extra").unwrap();
        assert_eq!(
            members
                .source(id)
                .adapt_to::<PlaceSetting>()
                .unwrap()
                .matching_target(),
            Some(node)
        );
    }

    #[test]
    fn test_promotion_moves_fallback_node_and_runs_handler_once() {
        let mut members = MembersRegistry::new(vec![
            Source::new("title", SourceKind::Field),
            Source::new("details", SourceKind::Field).with_place("Advanced"),
        ]);
        let mut tree = TargetTree::new("dialog");
        let root = tree.root();
        let invocations = std::cell::Cell::new(0usize);
        let mut handler = |source: &Source, tree: &mut TargetTree, node: TargetId| -> Result<()> {
            invocations.set(invocations.get() + 1);
            tree.set_attribute(node, "name", source.name());
            Ok(())
        };

        // Outer pass: single-column dialog, no sections yet
        PlacementEngine::new(root, &mut members)
            .place(&mut tree, &mut handler)
            .unwrap();
        assert_eq!(invocations.get(), 2);

        // Nested tabs widget declares the section the directive asked for
        let widget = tree.get_or_create_child(root, "tabs_widget");
        let sections = SectionsRegistry::new(
            vec![Section::new("Main"), Section::new("Advanced")],
            vec![],
        );
        PlacementEngine::new(widget, &mut members)
            .with_sections(&sections)
            .place(&mut tree, &mut handler)
            .unwrap();

        // Handler did not run again at promotion
        assert_eq!(invocations.get(), 2);
        let details = members.find_by_name("details").unwrap();
        assert_eq!(members.state(details), MemberState::CheckedOut);

        // The fallback node moved; exactly one rendering remains
        let dialog_items = tree.child_by_name(root, NN_ITEMS).unwrap();
        assert!(tree.child_by_name(dialog_items, "details").is_none());
        let advanced = tree.child_by_name(widget, "advanced").unwrap();
        let advanced_items = tree.child_by_name(advanced, NN_ITEMS).unwrap();
        let node = tree.child_by_name(advanced_items, "details").unwrap();
        assert_eq!(tree.attribute(node, "name"), Some("details"));
    }

    #[test]
    fn test_colliding_soft_members_promote_without_duplicates() {
        let mut members = MembersRegistry::new(vec![
            Source::new("title", SourceKind::Field).with_place("Advanced"),
            Source::new("title", SourceKind::Declared).with_place("Advanced"),
        ]);
        let mut tree = TargetTree::new("dialog");
        let root = tree.root();
        PlacementEngine::new(root, &mut members)
            .place(&mut tree, &mut noop())
            .unwrap();
        let dialog_items = tree.child_by_name(root, NN_ITEMS).unwrap();
        assert_eq!(tree.children(dialog_items).len(), 2);

        let widget = tree.get_or_create_child(root, "tabs_widget");
        let sections = SectionsRegistry::new(vec![Section::new("Advanced")], vec![]);
        PlacementEngine::new(widget, &mut members)
            .with_sections(&sections)
            .place(&mut tree, &mut noop())
            .unwrap();

        // Both renamed fallback nodes moved; no stale copies remain
        assert!(tree.children(dialog_items).is_empty());
        let advanced = tree.child_by_name(widget, "advanced").unwrap();
        let advanced_items = tree.child_by_name(advanced, NN_ITEMS).unwrap();
        let names: Vec<&str> = tree.child_names(advanced_items).collect();
        assert_eq!(names, vec!["title", "title_1"]);
        assert!(members.all_available().is_empty());
    }

    #[test]
    fn test_first_section_absorbs_directiveless_members() {
        let mut members = MembersRegistry::new(vec![
            Source::new("title", SourceKind::Field),
            Source::new("details", SourceKind::Field).with_place("Advanced"),
        ]);
        let mut tree = TargetTree::new("dialog");
        let root = tree.root();
        let sections = SectionsRegistry::new(
            vec![Section::new("Main"), Section::new("Advanced")],
            vec![],
        );
        PlacementEngine::new(root, &mut members)
            .with_sections(&sections)
            .place(&mut tree, &mut labeling())
            .unwrap();

        let main = tree.child_by_name(root, "main").unwrap();
        let main_items = tree.child_by_name(main, NN_ITEMS).unwrap();
        assert!(tree.child_by_name(main_items, "title").is_some());
        assert!(tree.child_by_name(main_items, "details").is_none());

        let advanced = tree.child_by_name(root, "advanced").unwrap();
        let advanced_items = tree.child_by_name(advanced, NN_ITEMS).unwrap();
        assert!(tree.child_by_name(advanced_items, "details").is_some());
        assert!(members.all_available().is_empty());
    }

    #[test]
    fn test_ignored_section_checks_out_without_rendering() {
        let mut members = MembersRegistry::new(vec![
            Source::new("title", SourceKind::Field),
            Source::new("legacy", SourceKind::Field).with_place("Hidden"),
        ]);
        let mut tree = TargetTree::new("dialog");
        let root = tree.root();
        let sections = SectionsRegistry::new(
            vec![Section::new("Main"), Section::new("Hidden")],
            vec!["Hidden".to_string()],
        );
        PlacementEngine::new(root, &mut members)
            .with_sections(&sections)
            .place(&mut tree, &mut noop())
            .unwrap();

        assert!(tree.child_by_name(root, "hidden").is_none());
        assert!(members.all_available().is_empty());
        let legacy = members.find_by_name("legacy").unwrap();
        assert_eq!(members.state(legacy), MemberState::CheckedOut);
    }

    #[test]
    fn test_predeclared_sources_merge_and_resort() {
        let mut members = MembersRegistry::new(vec![
            Source::new("zeta", SourceKind::Field).with_rank(5),
            Source::new("alpha", SourceKind::Field).with_rank(1),
        ]);
        let zeta = members.find_by_name("zeta").unwrap();
        let mut tree = TargetTree::new("dialog");
        let root = tree.root();
        let sections = SectionsRegistry::new(
            vec![Section::new("Main").with_sources(vec![zeta])],
            vec![],
        );
        PlacementEngine::new(root, &mut members)
            .with_sections(&sections)
            .place(&mut tree, &mut noop())
            .unwrap();

        let main = tree.child_by_name(root, "main").unwrap();
        let items = tree.child_by_name(main, NN_ITEMS).unwrap();
        let names: Vec<&str> = tree.child_names(items).collect();
        // merged slate re-sorted by rank despite zeta being pre-declared
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_empty_registries_are_a_noop() {
        let mut members = MembersRegistry::new(vec![]);
        let mut tree = TargetTree::new("dialog");
        let root = tree.root();
        let sections = SectionsRegistry::new(vec![], vec![]);
        PlacementEngine::new(root, &mut members)
            .with_sections(&sections)
            .place(&mut tree, &mut noop())
            .unwrap();
        PlacementEngine::new(root, &mut members)
            .place(&mut tree, &mut noop())
            .unwrap();
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn test_colliding_members_render_distinct_nodes() {
        let mut members = MembersRegistry::new(vec![
            Source::new("title", SourceKind::Field),
            Source::new("title", SourceKind::Declared),
        ]);
        let mut tree = TargetTree::new("dialog");
        let root = tree.root();
        PlacementEngine::new(root, &mut members)
            .place(&mut tree, &mut noop())
            .unwrap();

        let items = tree.child_by_name(root, NN_ITEMS).unwrap();
        let names: Vec<&str> = tree.child_names(items).collect();
        assert_eq!(names, vec!["title", "title_1"]);
    }

    #[test]
    fn test_handler_error_propagates() {
        let mut members =
            MembersRegistry::new(vec![Source::new("title", SourceKind::Field)]);
        let mut tree = TargetTree::new("dialog");
        let root = tree.root();
        let mut failing = |source: &Source, _: &mut TargetTree, _: TargetId| -> Result<()> {
            Err(Error::handler(source.name(), "widget mapping failed"))
        };
        let result = PlacementEngine::new(root, &mut members).place(&mut tree, &mut failing);
        assert!(matches!(result, Err(Error::Handler { .. })));
    }
}
