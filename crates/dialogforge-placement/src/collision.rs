//! Sibling name collision solver
//!
//! Runs over a slate of members about to render as sibling nodes, before
//! any node is created, since resolution can change node names. Two passes:
//! first the field/accessor coincidence dedup (so a logical property pair
//! collapses instead of being suffixed), then deterministic renaming of the
//! remaining duplicates. Collisions are always resolved locally and never
//! abort the build.

use crate::registries::MembersRegistry;
use crate::sources::{PlaceSetting, SourceId, SourceKind};
use crate::targets::TargetTree;
use std::collections::HashSet;

/// Collapse field/accessor pairs that represent the same logical property
///
/// When a field and an accessor method resolve to the same node name, the
/// accessor survives; the field is removed from the slate and checked out
/// so the pair renders as a single node. A superseded field that was
/// provisionally placed earlier has its recorded fallback node pruned from
/// the tree, leaving the accessor's rendering as the only one.
pub fn resolve_property_coincidences(
    slate: &mut Vec<SourceId>,
    members: &mut MembersRegistry,
    tree: &mut TargetTree,
) {
    let mut superseded: Vec<SourceId> = Vec::new();
    for id in slate.iter().copied() {
        if members.source(id).kind() != SourceKind::Field {
            continue;
        }
        let node_name = members.source(id).node_name();
        let has_accessor_twin = slate.iter().copied().any(|other| {
            other != id
                && members.source(other).kind() == SourceKind::Accessor
                && members.source(other).node_name() == node_name
        });
        if has_accessor_twin {
            superseded.push(id);
        }
    }
    for id in &superseded {
        tracing::debug!(
            member = members.source(*id).name(),
            "field superseded by accessor with the same property name"
        );
        let former = members
            .source(*id)
            .adapt_to::<PlaceSetting>()
            .and_then(PlaceSetting::matching_target);
        if let Some(former) = former {
            if let Some(parent) = tree.parent(former) {
                let name = tree.name(former).to_string();
                tree.remove_child(parent, &name);
            }
            if let Some(setting) = members.source_mut(*id).adapt_to_mut::<PlaceSetting>() {
                setting.clear_matching_target();
            }
        }
        members.check_out(*id);
    }
    slate.retain(|id| !superseded.contains(id));
}

/// Rename later members whose node names collide with an earlier sibling
///
/// The first occurrence keeps its name; subsequent occurrences get `_1`,
/// `_2`, ... suffixes, skipping names already taken in the slate.
pub fn resolve_collisions(slate: &[SourceId], members: &mut MembersRegistry) {
    let mut taken: HashSet<String> = HashSet::new();
    for id in slate.iter().copied() {
        let name = members.source(id).node_name().to_string();
        if taken.insert(name.clone()) {
            continue;
        }
        let mut suffix = 1;
        let renamed = loop {
            let candidate = format!("{name}_{suffix}");
            if !taken.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        tracing::debug!(
            member = members.source(id).name(),
            from = %name,
            to = %renamed,
            "renamed colliding member"
        );
        taken.insert(renamed.clone());
        members.source_mut(id).set_node_name(renamed);
    }
}
