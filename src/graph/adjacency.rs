//! `AdjacencySet`: an insertion-ordered set of node handles.
//!
//! Structure:
//! - **Dense vector**: members in insertion order; iteration and positional access
//!   walk this vector directly.
//! - **Position index**: hash map from member to its slot in the dense vector, giving
//!   O(1) membership tests.
//!
//! Removal shifts the tail of the dense vector left so the relative order of the
//! remaining members is preserved. Adjacency sets are small in practice, so the
//! O(degree) shift is cheaper than maintaining tombstones.

use std::collections::HashMap;

use super::node::NodeId;

/// Insertion-ordered set of [`NodeId`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencySet {
    members: Vec<NodeId>,
    positions: HashMap<NodeId, usize>,
}

impl AdjacencySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Number of members.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the set has no members.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Membership test.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.positions.contains_key(&node)
    }

    /// Member at insertion position `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.members.get(index).copied()
    }

    /// Members in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.members
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.members.iter().copied()
    }

    /// Appends `node` unless already present. Returns `true` if the set changed.
    pub fn insert(&mut self, node: NodeId) -> bool {
        if self.positions.contains_key(&node) {
            return false;
        }
        self.positions.insert(node, self.members.len());
        self.members.push(node);
        true
    }

    /// Removes `node`, preserving the order of the remaining members.
    /// Returns `true` if the set changed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        let Some(pos) = self.positions.remove(&node) else {
            return false;
        };
        self.members.remove(pos);
        for shifted in &self.members[pos..] {
            if let Some(slot) = self.positions.get_mut(shifted) {
                *slot -= 1;
            }
        }
        true
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        self.members.clear();
        self.positions.clear();
    }
}

impl<'a> IntoIterator for &'a AdjacencySet {
    type Item = NodeId;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter().copied()
    }
}

impl IntoIterator for AdjacencySet {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}
