//! Nested-interval tree engine
//!
//! Every node carries a `(tree, left, right, depth)` tuple. Within one tree
//! the intervals nest: a node is a descendant of another exactly when its
//! interval lies strictly inside the other's. Descendant counting is
//! interval arithmetic, so reads never walk the tree. Inserting or deleting
//! renumbers the bounds of every node at or to the right of the touched
//! interval; callers must commit a renumbering as one atomic update.

use crate::error::{DiscussError, Result};
use crate::types::CommentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordering metadata for one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Tree membership: the id of the tree's root node
    pub tree: CommentId,
    /// Left interval bound
    pub left: u64,
    /// Right interval bound
    pub right: u64,
    /// Distance from the root (root is 0)
    pub depth: u32,
}

impl Placement {
    /// Number of nodes in the subtree, excluding the node itself
    pub fn descendant_count(&self) -> usize {
        ((self.right - self.left - 1) / 2) as usize
    }

    /// Whether `other` lies strictly inside this interval (is a descendant)
    pub fn contains(&self, other: &Placement) -> bool {
        self.tree == other.tree && self.left < other.left && other.right < self.right
    }
}

/// Interval bookkeeping for every node of one root scope (a forest)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeEngine {
    nodes: HashMap<CommentId, Placement>,
}

impl TreeEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node's placement
    pub fn placement(&self, id: &CommentId) -> Option<&Placement> {
        self.nodes.get(id)
    }

    /// Check whether a node is placed
    pub fn contains(&self, id: &CommentId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Total number of placed nodes
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no nodes are placed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Place a new root node, starting a fresh tree
    pub fn insert_root(&mut self, id: CommentId) -> Result<Placement> {
        if self.nodes.contains_key(&id) {
            return Err(DiscussError::Validation(format!(
                "Node {} is already placed",
                id
            )));
        }

        let placement = Placement {
            tree: id,
            left: 1,
            right: 2,
            depth: 0,
        };
        self.nodes.insert(id, placement);
        Ok(placement)
    }

    /// Place a new node as the last child of `parent`
    ///
    /// The new interval opens at the parent's right bound; every bound at or
    /// past that point in the same tree shifts by two to make room.
    pub fn insert_child(&mut self, parent: &CommentId, id: CommentId) -> Result<Placement> {
        if self.nodes.contains_key(&id) {
            return Err(DiscussError::Validation(format!(
                "Node {} is already placed",
                id
            )));
        }
        let parent_placement = *self.nodes.get(parent).ok_or_else(|| {
            DiscussError::CommentNotFound(parent.to_string())
        })?;

        let at = parent_placement.right;
        for node in self.nodes.values_mut() {
            if node.tree != parent_placement.tree {
                continue;
            }
            if node.left >= at {
                node.left += 2;
            }
            if node.right >= at {
                node.right += 2;
            }
        }

        let placement = Placement {
            tree: parent_placement.tree,
            left: at,
            right: at + 1,
            depth: parent_placement.depth + 1,
        };
        self.nodes.insert(id, placement);
        Ok(placement)
    }

    /// Direct children of a node, in insertion (creation) order
    pub fn children_of(&self, id: &CommentId) -> Vec<CommentId> {
        let Some(parent) = self.nodes.get(id) else {
            return Vec::new();
        };

        let mut children: Vec<(u64, CommentId)> = self
            .nodes
            .iter()
            .filter(|(_, node)| parent.contains(node) && node.depth == parent.depth + 1)
            .map(|(child_id, node)| (node.left, *child_id))
            .collect();
        children.sort_by_key(|(left, _)| *left);
        children.into_iter().map(|(_, child_id)| child_id).collect()
    }

    /// Count of all nodes in the subtree, excluding the node itself
    pub fn descendant_count(&self, id: &CommentId) -> usize {
        self.nodes
            .get(id)
            .map(|node| node.descendant_count())
            .unwrap_or(0)
    }

    /// Remove a node and its entire subtree; returns the removed ids
    ///
    /// Remaining bounds in the tree shrink by the subtree's width, so the
    /// interval encoding stays dense.
    pub fn delete_subtree(&mut self, id: &CommentId) -> Result<Vec<CommentId>> {
        let target = *self.nodes.get(id).ok_or_else(|| {
            DiscussError::CommentNotFound(id.to_string())
        })?;
        let width = target.right - target.left + 1;

        let mut removed: Vec<(u64, CommentId)> = self
            .nodes
            .iter()
            .filter(|(_, node)| {
                node.tree == target.tree && node.left >= target.left && node.right <= target.right
            })
            .map(|(node_id, node)| (node.left, *node_id))
            .collect();
        removed.sort_by_key(|(left, _)| *left);

        for (_, node_id) in &removed {
            self.nodes.remove(node_id);
        }
        for node in self.nodes.values_mut() {
            if node.tree != target.tree {
                continue;
            }
            if node.left > target.right {
                node.left -= width;
            }
            if node.right > target.right {
                node.right -= width;
            }
        }

        Ok(removed.into_iter().map(|(_, node_id)| node_id).collect())
    }

    /// Ancestors of a node, ordered root first, parent last
    pub fn ancestor_chain(&self, id: &CommentId) -> Vec<CommentId> {
        let Some(target) = self.nodes.get(id) else {
            return Vec::new();
        };

        let mut ancestors: Vec<(u64, CommentId)> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.contains(target))
            .map(|(node_id, node)| (node.left, *node_id))
            .collect();
        ancestors.sort_by_key(|(left, _)| *left);
        ancestors.into_iter().map(|(_, node_id)| node_id).collect()
    }

    /// Depth of a node (root is 0)
    pub fn depth_of(&self, id: &CommentId) -> Option<u32> {
        self.nodes.get(id).map(|node| node.depth)
    }

    /// Root nodes of the forest, unordered; callers order by creation time
    pub fn roots(&self) -> Vec<CommentId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.depth == 0)
            .map(|(node_id, _)| *node_id)
            .collect()
    }
}
