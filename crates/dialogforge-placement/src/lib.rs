//! DialogForge Placement - member-to-section distribution
//!
//! This crate decides which annotated class member renders into which
//! container node of a dialog, in what order, resolving name collisions
//! and honoring explicit placement directives.
//!
//! # Components
//!
//! - **Target tree**: in-memory container tree with insertion-ordered,
//!   uniquely-named children, later serialized to XML by an external writer
//! - **Registries**: mutable partitions of placeable members
//!   (available / soft-checked-out / checked-out) and of declared sections
//!   (rendered / ignored)
//! - **Collision solver**: sibling name dedup and deterministic renaming
//! - **Placement engine**: single- and multi-section distribution with
//!   soft checkout for members awaiting a more specific section
//!
//! # Example
//! ```
//! use dialogforge_placement::{
//!     MembersRegistry, PlacementEngine, Source, SourceKind, TargetId, TargetTree,
//! };
//!
//! let mut members = MembersRegistry::new(vec![
//!     Source::new("getTitle", SourceKind::Accessor),
//!     Source::new("description", SourceKind::Field),
//! ]);
//! let mut tree = TargetTree::new("dialog");
//! let root = tree.root();
//! let mut handler = |source: &Source, tree: &mut TargetTree, node: TargetId|
//!     -> dialogforge_common::Result<()> {
//!     tree.set_attribute(node, "name", source.name());
//!     Ok(())
//! };
//! PlacementEngine::new(root, &mut members)
//!     .place(&mut tree, &mut handler)
//!     .unwrap();
//! assert!(members.available().is_empty());
//! ```

pub mod adaptation;
pub mod collision;
pub mod engine;
pub mod registries;
pub mod sections;
pub mod sources;
pub mod targets;

pub use adaptation::AdaptationMap;
pub use engine::{MemberHandler, PlacementEngine};
pub use registries::{MemberState, MembersRegistry, SectionsRegistry};
pub use sections::Section;
pub use sources::{PlaceSetting, Source, SourceId, SourceKind};
pub use targets::{TargetId, TargetTree, NN_ITEMS};
