//! Output container tree
//!
//! An arena of named nodes addressed by [`TargetId`]. Children are
//! insertion-ordered and uniquely named per parent; attributes keep
//! insertion order too, since the external XML writer must reproduce both
//! orders bit-for-bit. Nodes detached from their parent stay in the arena
//! as orphans; ids remain valid for the lifetime of the tree.

use indexmap::IndexMap;

/// Node name of the flat widget container inside a dialog or section
pub const NN_ITEMS: &str = "items";

/// Handle to a node in a [`TargetTree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(usize);

#[derive(Debug)]
struct TargetNode {
    name: String,
    parent: Option<TargetId>,
    children: Vec<TargetId>,
    attributes: IndexMap<String, String>,
}

impl TargetNode {
    fn new(name: &str, parent: Option<TargetId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            attributes: IndexMap::new(),
        }
    }
}

/// In-memory container tree produced by the placement engine
#[derive(Debug)]
pub struct TargetTree {
    nodes: Vec<TargetNode>,
    root: TargetId,
}

impl TargetTree {
    /// Create a tree holding a single root node
    #[must_use]
    pub fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![TargetNode::new(root_name, None)],
            root: TargetId(0),
        }
    }

    /// The root node
    #[must_use]
    pub fn root(&self) -> TargetId {
        self.root
    }

    /// Name of a node
    #[must_use]
    pub fn name(&self, id: TargetId) -> &str {
        &self.nodes[id.0].name
    }

    /// Parent of a node; `None` for the root and for detached nodes
    #[must_use]
    pub fn parent(&self, id: TargetId) -> Option<TargetId> {
        self.nodes[id.0].parent
    }

    /// Children of a node in insertion order
    #[must_use]
    pub fn children(&self, id: TargetId) -> &[TargetId] {
        &self.nodes[id.0].children
    }

    /// Child names of a node in insertion order
    pub fn child_names(&self, id: TargetId) -> impl Iterator<Item = &str> {
        self.nodes[id.0]
            .children
            .iter()
            .map(|child| self.name(*child))
    }

    /// Look up a child by name
    #[must_use]
    pub fn child_by_name(&self, parent: TargetId, name: &str) -> Option<TargetId> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].name == name)
    }

    /// Fetch the named child of `parent`, creating it if absent
    pub fn get_or_create_child(&mut self, parent: TargetId, name: &str) -> TargetId {
        if let Some(existing) = self.child_by_name(parent, name) {
            return existing;
        }
        let id = TargetId(self.nodes.len());
        self.nodes.push(TargetNode::new(name, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Detach the named child of `parent`, returning its id
    ///
    /// The node and its subtree stay in the arena as orphans.
    pub fn remove_child(&mut self, parent: TargetId, name: &str) -> Option<TargetId> {
        let child = self.child_by_name(parent, name)?;
        self.nodes[parent.0].children.retain(|id| *id != child);
        self.nodes[child.0].parent = None;
        Some(child)
    }

    /// Move a node under a new parent with the given name, preserving its
    /// identity, attributes, and subtree
    ///
    /// An existing child of `new_parent` with the same name is detached
    /// first so sibling names stay unique.
    pub fn reattach(&mut self, node: TargetId, new_parent: TargetId, name: &str) {
        if let Some(former_parent) = self.nodes[node.0].parent {
            self.nodes[former_parent.0].children.retain(|id| *id != node);
        }
        if let Some(occupant) = self.child_by_name(new_parent, name) {
            if occupant != node {
                self.remove_child(new_parent, name);
            }
        }
        self.nodes[node.0].name = name.to_string();
        self.nodes[node.0].parent = Some(new_parent);
        self.nodes[new_parent.0].children.push(node);
    }

    /// Set an attribute on a node, keeping first-insertion order
    pub fn set_attribute(
        &mut self,
        id: TargetId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.nodes[id.0].attributes.insert(key.into(), value.into());
    }

    /// Read an attribute of a node
    #[must_use]
    pub fn attribute(&self, id: TargetId, key: &str) -> Option<&str> {
        self.nodes[id.0].attributes.get(key).map(String::as_str)
    }

    /// All attributes of a node in insertion order
    #[must_use]
    pub fn attributes(&self, id: TargetId) -> &IndexMap<String, String> {
        &self.nodes[id.0].attributes
    }

    /// Check whether a node is reachable from the root
    #[must_use]
    pub fn is_attached(&self, id: TargetId) -> bool {
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            current = parent;
        }
        current == self.root
    }
}
