//! Playlist hierarchy and its id index
//!
//! The provider hands over an owned forest of [`PlaylistNode`]s. Building a
//! [`PlaylistTree`] flattens it into an arena in pre-order, dropping nodes
//! that would break id uniqueness, and indexes every kept node by id. A tree
//! is never patched: refresh builds a new one and swaps it in whole.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CurationError, Result};

/// Id the renderer uses for the invisible root above the forest
pub const ROOT_ID: &str = "";

/// A playlist or playlist folder as delivered by the provider
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub children: Vec<PlaylistNode>,
}

impl PlaylistNode {
    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn folder(id: impl Into<String>, name: impl Into<String>, children: Vec<PlaylistNode>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children,
        }
    }
}

/// A node inside a built tree
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    id: String,
    name: String,
    children: Vec<usize>,
}

impl TreeNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Where the current forest came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LibraryOrigin {
    #[default]
    Provider,
    /// Built-in stand-in used when the provider had no playlists
    Placeholder,
}

/// Immutable forest plus id index
#[derive(Clone, Debug, Default)]
pub struct PlaylistTree {
    nodes: Vec<TreeNode>,
    roots: Vec<usize>,
    index: HashMap<String, usize>,
    origin: LibraryOrigin,
    skipped: usize,
}

impl PlaylistTree {
    /// Build from a provider forest.
    ///
    /// Nodes with an empty id or an id already seen are dropped together with
    /// their subtree.
    pub fn build(forest: Vec<PlaylistNode>) -> Self {
        Self::build_with_origin(forest, LibraryOrigin::Provider)
    }

    /// The fixed stand-in library, tagged as synthetic
    pub fn placeholder() -> Self {
        Self::build_with_origin(placeholder_forest(), LibraryOrigin::Placeholder)
    }

    fn build_with_origin(forest: Vec<PlaylistNode>, origin: LibraryOrigin) -> Self {
        let mut tree = PlaylistTree {
            origin,
            ..Default::default()
        };

        // (node, parent arena slot); reversed so pops come out in order
        let mut stack: Vec<(PlaylistNode, Option<usize>)> =
            forest.into_iter().rev().map(|node| (node, None)).collect();

        while let Some((node, parent)) = stack.pop() {
            let PlaylistNode { id, name, children } = node;

            if id.is_empty() || tree.index.contains_key(&id) {
                tracing::warn!(
                    id = %id,
                    name = %name,
                    dropped_children = children.len(),
                    "Skipping malformed playlist node"
                );
                tree.skipped += 1;
                continue;
            }

            let slot = tree.nodes.len();
            tree.index.insert(id.clone(), slot);
            tree.nodes.push(TreeNode {
                id,
                name,
                children: Vec::with_capacity(children.len()),
            });

            match parent {
                Some(parent) => tree.nodes[parent].children.push(slot),
                None => tree.roots.push(slot),
            }

            stack.extend(children.into_iter().rev().map(|child| (child, Some(slot))));
        }

        tracing::debug!(
            roots = tree.roots.len(),
            nodes = tree.nodes.len(),
            skipped = tree.skipped,
            synthetic = tree.is_synthetic(),
            "Playlist tree built"
        );

        tree
    }

    pub fn origin(&self) -> LibraryOrigin {
        self.origin
    }

    /// True when the forest is the built-in placeholder, not a real library
    pub fn is_synthetic(&self) -> bool {
        self.origin == LibraryOrigin::Placeholder
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes dropped while building
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Ordered child ids of `id`, or the root ids for [`ROOT_ID`].
    /// Unknown ids have no children.
    pub fn children_of(&self, id: &str) -> Vec<&str> {
        let slots = if id == ROOT_ID {
            &self.roots
        } else {
            match self.index.get(id) {
                Some(&slot) => &self.nodes[slot].children,
                None => return Vec::new(),
            }
        };

        slots.iter().map(|&slot| self.nodes[slot].id.as_str()).collect()
    }

    pub fn is_container(&self, id: &str) -> bool {
        if id == ROOT_ID {
            return true;
        }
        self.index
            .get(id)
            .is_some_and(|&slot| self.nodes[slot].is_container())
    }

    pub fn node_by_id(&self, id: &str) -> Result<&TreeNode> {
        self.index
            .get(id)
            .map(|&slot| &self.nodes[slot])
            .ok_or_else(|| CurationError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All nodes in pre-order
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }
}

fn placeholder_forest() -> Vec<PlaylistNode> {
    vec![
        PlaylistNode::folder(
            "test1",
            "House Music",
            vec![
                PlaylistNode::leaf("house1", "Deep House"),
                PlaylistNode::leaf("house2", "Tech House"),
            ],
        ),
        PlaylistNode::folder(
            "test2",
            "Electronic",
            vec![
                PlaylistNode::leaf("elec1", "Synthwave"),
                PlaylistNode::leaf("elec2", "Ambient"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_forest() -> Vec<PlaylistNode> {
        vec![
            PlaylistNode::folder(
                "r",
                "Root",
                vec![
                    PlaylistNode::leaf("l1", "First"),
                    PlaylistNode::folder("f", "Nested", vec![PlaylistNode::leaf("l3", "Deep")]),
                    PlaylistNode::leaf("l2", "Second"),
                ],
            ),
            PlaylistNode::leaf("solo", "Solo"),
        ]
    }

    #[test]
    fn test_children_preserve_order() {
        let tree = PlaylistTree::build(sample_forest());
        assert_eq!(tree.children_of(ROOT_ID), vec!["r", "solo"]);
        assert_eq!(tree.children_of("r"), vec!["l1", "f", "l2"]);
        assert_eq!(tree.children_of("f"), vec!["l3"]);
        assert!(tree.children_of("l1").is_empty());
        assert!(tree.children_of("missing").is_empty());
    }

    #[test]
    fn test_every_child_resolves_to_itself() {
        let tree = PlaylistTree::build(sample_forest());
        let mut pending = vec![ROOT_ID.to_string()];
        let mut seen = 0;
        while let Some(id) = pending.pop() {
            for child in tree.children_of(&id) {
                assert_eq!(tree.node_by_id(child).unwrap().id(), child);
                pending.push(child.to_string());
                seen += 1;
            }
        }
        assert_eq!(seen, tree.len());
    }

    #[test]
    fn test_is_container_matches_children() {
        let tree = PlaylistTree::build(sample_forest());
        assert!(tree.is_container(ROOT_ID));
        for node in tree.iter() {
            assert_eq!(tree.is_container(node.id()), !tree.children_of(node.id()).is_empty());
        }
        assert!(!tree.is_container("missing"));
    }

    #[test]
    fn test_root_is_container_even_when_empty() {
        let tree = PlaylistTree::build(Vec::new());
        assert!(tree.is_empty());
        assert!(tree.is_container(ROOT_ID));
        assert!(tree.children_of(ROOT_ID).is_empty());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let tree = PlaylistTree::build(sample_forest());
        assert!(matches!(tree.node_by_id("nope"), Err(CurationError::NotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_duplicate_and_empty_ids_are_skipped() {
        let forest = vec![
            PlaylistNode::folder(
                "a",
                "A",
                vec![
                    PlaylistNode::leaf("dup", "First dup"),
                    PlaylistNode::folder("", "No id", vec![PlaylistNode::leaf("orphan", "Orphan")]),
                ],
            ),
            PlaylistNode::leaf("dup", "Second dup"),
        ];

        let tree = PlaylistTree::build(forest);
        assert_eq!(tree.children_of(ROOT_ID), vec!["a"]);
        assert_eq!(tree.children_of("a"), vec!["dup"]);
        assert_eq!(tree.node_by_id("dup").unwrap().name(), "First dup");
        assert!(!tree.contains("orphan"));
        assert_eq!(tree.skipped(), 2);
    }

    #[test]
    fn test_placeholder_is_tagged() {
        let tree = PlaylistTree::placeholder();
        assert!(tree.is_synthetic());
        assert_eq!(tree.children_of(ROOT_ID), vec!["test1", "test2"]);
        assert_eq!(tree.children_of("test1"), vec!["house1", "house2"]);
        assert!(!PlaylistTree::build(sample_forest()).is_synthetic());
    }
}
