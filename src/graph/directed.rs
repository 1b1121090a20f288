//! `Graph`: a container owning a set of uniquely named directed nodes.
//!
//! Nodes are stored in a generational [`NodeArena`] and indexed by name in a
//! `BTreeMap`, which fixes the canonical iteration order (ascending name) that
//! every traversal in this crate follows.
//!
//! The graph counts structural modifications. The counter moves by exactly one for:
//! - each node insertion,
//! - each arc insertion and each arc removal,
//! - each adjacency set a node is unlinked from while one of its nodes is cleared,
//! - each node removal (on top of the unlink increments of clearing it),
//! - each node present when the whole graph is cleared (likewise on top).
//!
//! # Performance
//! - `add_node`: O(log n)
//! - `remove_node` / `clear_node`: O(degree · degree) (order-preserving unlink)
//! - `add_child` / `has_child`: O(1)
//! - `remove_child`: O(degree)

use std::collections::BTreeMap;

use super::adjacency::AdjacencySet;
use super::arena::NodeArena;
use super::node::{DirectedNode, GraphId, GraphNode, NodeId};
use crate::error::{GraphError, GraphResult};

/// A directed graph owning its nodes.
pub struct Graph<N = DirectedNode> {
    id: GraphId,
    arena: NodeArena<N>,
    names: BTreeMap<String, NodeId>,
    edge_count: usize,
    modification_count: u64,
}

impl<N: GraphNode> Graph<N> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty graph with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: GraphId::next(),
            arena: NodeArena::with_capacity(capacity),
            names: BTreeMap::new(),
            edge_count: 0,
            modification_count: 0,
        }
    }

    /// Identity of this graph; every handle it issues carries it.
    #[inline(always)]
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Number of nodes.
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the graph holds no nodes.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Number of arcs.
    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of structural modifications made so far.
    #[inline(always)]
    pub fn modification_count(&self) -> u64 {
        self.modification_count
    }

    /// Upper bound (exclusive) on [`NodeId::index`] for handles issued by this graph.
    #[inline(always)]
    pub fn slot_count(&self) -> usize {
        self.arena.slot_count()
    }

    /// Returns `true` if `id` names a node currently owned by this graph.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.graph_id() == self.id && self.arena.get(id.index(), id.generation()).is_some()
    }

    /// Looks a node up by name.
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Borrows the node behind `id`.
    ///
    /// # Errors
    /// Fails with an ownership-state error if `id` is not owned by this graph.
    pub fn node(&self, id: NodeId) -> GraphResult<&N> {
        if id.graph_id() != self.id {
            return Err(GraphError::ForeignNode {
                node: id,
                graph: self.id,
            });
        }
        self.arena
            .get(id.index(), id.generation())
            .ok_or(GraphError::DetachedNode { node: id })
    }

    fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut N> {
        if id.graph_id() != self.id {
            return Err(GraphError::ForeignNode {
                node: id,
                graph: self.id,
            });
        }
        self.arena
            .get_mut(id.index(), id.generation())
            .ok_or(GraphError::DetachedNode { node: id })
    }

    /// Name of the node behind `id`.
    ///
    /// # Errors
    /// Fails with an ownership-state error if `id` is not owned by this graph.
    pub fn name(&self, id: NodeId) -> GraphResult<&str> {
        self.node(id).map(GraphNode::name)
    }

    /// Takes ownership of `node` and returns its handle.
    ///
    /// Any adjacency the node carries is discarded: only its name survives.
    ///
    /// # Errors
    /// Fails with [`GraphError::DuplicateName`] if the name is already mapped.
    pub fn add_node(&mut self, mut node: N) -> GraphResult<NodeId> {
        if self.names.contains_key(node.name()) {
            return Err(GraphError::duplicate_name(self.id, node.name()));
        }
        node.take_adjacency();
        let name = node.name().to_owned();
        let (index, generation) = self.arena.insert(node);
        let id = NodeId::new(self.id, index, generation);
        self.names.insert(name, id);
        self.modification_count += 1;
        Ok(id)
    }

    /// Moves the node `id` out of `from` and into this graph.
    ///
    /// If `id` is already owned by this graph it is returned unchanged and
    /// nothing is counted. Otherwise the node is removed from `from` (its arcs
    /// detached and counted there) and inserted here under a fresh handle.
    ///
    /// # Errors
    /// - Ownership-state error if `id` is owned by neither graph.
    /// - [`GraphError::DuplicateName`] if this graph already maps the node's name;
    ///   `from` is left untouched in that case.
    pub fn adopt(&mut self, from: &mut Graph<N>, id: NodeId) -> GraphResult<NodeId> {
        if self.contains(id) {
            return Ok(id);
        }
        let name = from.node(id)?.name();
        if self.names.contains_key(name) {
            return Err(GraphError::duplicate_name(self.id, name));
        }
        let node = from.remove_node(id).ok_or(GraphError::DetachedNode { node: id })?;
        log_event!(trace, from = %from.id, to = %self.id, node = %id, "adopting node");
        self.add_node(node)
    }

    /// Removes the node `id`, detaching all its arcs first, and hands it back unowned.
    ///
    /// Returns `None` (and changes nothing) if the node is not owned by this graph.
    pub fn remove_node(&mut self, id: NodeId) -> Option<N> {
        if !self.contains(id) {
            return None;
        }
        self.detach_arcs(id);
        let node = self.arena.remove(id.index(), id.generation())?;
        self.names.remove(node.name());
        self.modification_count += 1;
        Some(node)
    }

    /// Detaches every incoming and outgoing arc of `id`.
    ///
    /// # Errors
    /// Fails with an ownership-state error if `id` is not owned by this graph.
    pub fn clear_node(&mut self, id: NodeId) -> GraphResult<()> {
        self.node(id)?;
        self.detach_arcs(id);
        Ok(())
    }

    /// Removes every node and arc.
    pub fn clear(&mut self) {
        let ids: Vec<NodeId> = self.names.values().copied().collect();
        for &id in &ids {
            self.detach_arcs(id);
        }
        self.modification_count += ids.len() as u64;
        self.names.clear();
        self.arena.clear();
        log_event!(trace, graph = %self.id, removed = ids.len(), "graph cleared");
    }

    /// Adds the arc `tail -> head`. Returns `true` if the arc was new.
    ///
    /// # Errors
    /// Fails with an ownership-state error unless both nodes are owned by this graph.
    pub fn add_child(&mut self, tail: NodeId, head: NodeId) -> GraphResult<bool> {
        self.check_pair(tail, head)?;
        if !self.node_mut(tail)?.link_child(head) {
            return Ok(false);
        }
        self.node_mut(head)?.link_parent(tail);
        self.edge_count += 1;
        self.modification_count += 1;
        Ok(true)
    }

    /// Removes the arc `tail -> head`. Returns `true` if the arc existed.
    ///
    /// # Errors
    /// Fails with an ownership-state error unless both nodes are owned by this graph.
    pub fn remove_child(&mut self, tail: NodeId, head: NodeId) -> GraphResult<bool> {
        self.check_pair(tail, head)?;
        if !self.node_mut(tail)?.unlink_child(head) {
            return Ok(false);
        }
        self.node_mut(head)?.unlink_parent(tail);
        self.edge_count -= 1;
        self.modification_count += 1;
        Ok(true)
    }

    /// Returns `true` if the arc `tail -> head` exists.
    ///
    /// # Errors
    /// Fails with an ownership-state error if `tail` is not owned by this graph.
    pub fn has_child(&self, tail: NodeId, head: NodeId) -> GraphResult<bool> {
        Ok(self.node(tail)?.has_child(head))
    }

    /// Read-only view of the outgoing neighbours of `id`.
    ///
    /// # Errors
    /// Fails with an ownership-state error if `id` is not owned by this graph.
    pub fn children(&self, id: NodeId) -> GraphResult<&AdjacencySet> {
        self.node(id).map(GraphNode::children)
    }

    /// Read-only view of the incoming neighbours of `id`.
    ///
    /// # Errors
    /// Fails with an ownership-state error if `id` is not owned by this graph.
    pub fn parents(&self, id: NodeId) -> GraphResult<&AdjacencySet> {
        self.node(id).map(GraphNode::parents)
    }

    /// Iterates `(handle, node)` pairs in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        self.names.values().filter_map(move |&id| {
            self.arena
                .get(id.index(), id.generation())
                .map(|node| (id, node))
        })
    }

    /// Iterates node handles in ascending name order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.names.values().copied()
    }

    /// Children of a node known to be live. Used by traversals that walk handles
    /// obtained from this graph.
    #[inline]
    pub(crate) fn children_of(&self, id: NodeId) -> Option<&AdjacencySet> {
        self.arena
            .get(id.index(), id.generation())
            .map(GraphNode::children)
    }

    fn check_pair(&self, tail: NodeId, head: NodeId) -> GraphResult<()> {
        self.node(tail)?;
        if head.graph_id() != tail.graph_id() {
            return Err(GraphError::MixedGraphs {
                first: tail,
                second: head,
            });
        }
        self.node(head)?;
        Ok(())
    }

    /// Unlinks `id` from every neighbour, counting one modification per
    /// neighbour set that actually changed. A self-loop counts once.
    fn detach_arcs(&mut self, id: NodeId) {
        let Some(node) = self.arena.get_mut(id.index(), id.generation()) else {
            return;
        };
        let (children, parents) = node.take_adjacency();

        for child in children {
            self.edge_count -= 1;
            if child == id {
                // Self-loop: one detach, the node's own parent set went with take_adjacency.
                self.modification_count += 1;
                continue;
            }
            if let Some(child_node) = self.arena.get_mut(child.index(), child.generation()) {
                if child_node.unlink_parent(id) {
                    self.modification_count += 1;
                }
            }
        }

        for parent in parents {
            if parent == id {
                continue;
            }
            if let Some(parent_node) = self.arena.get_mut(parent.index(), parent.generation()) {
                if parent_node.unlink_child(id) {
                    self.edge_count -= 1;
                    self.modification_count += 1;
                }
            }
        }
    }
}

impl<N: GraphNode> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> core::fmt::Debug for Graph<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count)
            .field("modification_count", &self.modification_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn graph_with(names: &[&str]) -> (Graph, Vec<NodeId>) {
        let mut graph = Graph::new();
        let ids = names
            .iter()
            .map(|name| graph.add_node(DirectedNode::new(*name)).unwrap())
            .collect();
        (graph, ids)
    }

    #[test]
    fn add_and_lookup_nodes() {
        let (graph, ids) = graph_with(&["A", "C", "E"]);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.get("A"), Some(ids[0]));
        assert_eq!(graph.get("C"), Some(ids[1]));
        assert_eq!(graph.get("E"), Some(ids[2]));
        assert_eq!(graph.get("B"), None);
        assert_eq!(graph.name(ids[1]).unwrap(), "C");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let (mut graph, _) = graph_with(&["A"]);
        let err = graph.add_node(DirectedNode::new("A")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.modification_count(), 1);
    }

    #[test]
    fn add_child_is_idempotent() {
        let (mut graph, ids) = graph_with(&["a", "b"]);
        assert!(graph.add_child(ids[0], ids[1]).unwrap());
        assert!(!graph.add_child(ids[0], ids[1]).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.modification_count(), 3);

        assert!(graph.has_child(ids[0], ids[1]).unwrap());
        assert!(!graph.has_child(ids[1], ids[0]).unwrap());
        assert_eq!(graph.parents(ids[1]).unwrap().as_slice(), &[ids[0]]);
    }

    #[test]
    fn remove_child_of_absent_arc_is_a_no_op() {
        let (mut graph, ids) = graph_with(&["a", "b"]);
        assert!(!graph.remove_child(ids[0], ids[1]).unwrap());
        assert_eq!(graph.modification_count(), 2);

        graph.add_child(ids[0], ids[1]).unwrap();
        assert!(graph.remove_child(ids[0], ids[1]).unwrap());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.children(ids[0]).unwrap().is_empty());
        assert!(graph.parents(ids[1]).unwrap().is_empty());
        assert_eq!(graph.modification_count(), 4);
    }

    #[test]
    fn removed_handles_are_detached() {
        let (mut graph, ids) = graph_with(&["a", "b"]);
        graph.add_child(ids[0], ids[1]).unwrap();

        let node = graph.remove_node(ids[0]).unwrap();
        assert_eq!(node.name(), "a");
        assert!(node.children().is_empty());
        assert!(graph.remove_node(ids[0]).is_none());

        let err = graph.children(ids[0]).unwrap_err();
        assert_eq!(err, GraphError::DetachedNode { node: ids[0] });
        assert_eq!(graph.add_child(ids[0], ids[1]).unwrap_err().kind(), ErrorKind::OwnershipState);
        assert!(graph.parents(ids[1]).unwrap().is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn arcs_across_graphs_are_rejected() {
        let (mut g1, a) = graph_with(&["a"]);
        let (g2, b) = graph_with(&["b"]);

        assert!(matches!(
            g1.add_child(a[0], b[0]),
            Err(GraphError::MixedGraphs { .. })
        ));
        assert!(matches!(
            g1.add_child(b[0], a[0]),
            Err(GraphError::ForeignNode { .. })
        ));
        assert!(matches!(g2.has_child(a[0], b[0]), Err(GraphError::ForeignNode { .. })));
    }

    #[test]
    fn self_loop_clear_counts_once() {
        let (mut graph, ids) = graph_with(&["z"]);
        graph.add_child(ids[0], ids[0]).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.modification_count(), 2);

        graph.clear_node(ids[0]).unwrap();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.modification_count(), 3);
        assert!(!graph.has_child(ids[0], ids[0]).unwrap());
    }

    #[test]
    fn clear_node_counts_incoming_and_outgoing() {
        let (mut graph, ids) = graph_with(&["a", "b", "c"]);
        graph.add_child(ids[0], ids[1]).unwrap();
        graph.add_child(ids[2], ids[1]).unwrap();
        graph.add_child(ids[1], ids[2]).unwrap();
        assert_eq!(graph.modification_count(), 6);

        graph.clear_node(ids[1]).unwrap();
        assert_eq!(graph.modification_count(), 9);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.children(ids[0]).unwrap().is_empty());
        assert!(graph.children(ids[2]).unwrap().is_empty());
        assert!(graph.parents(ids[2]).unwrap().is_empty());
    }

    #[test]
    fn iteration_is_name_ordered() {
        let (mut graph, _) = graph_with(&["D", "B", "F", "C"]);
        let names: Vec<_> = graph.iter().map(|(_, n)| n.name().to_owned()).collect();
        assert_eq!(names, vec!["B", "C", "D", "F"]);

        graph.clear();
        assert_eq!(graph.iter().count(), 0);
        assert!(graph.is_empty());
    }

    #[test]
    fn add_node_discards_foreign_adjacency() {
        let mut graph: Graph = Graph::new();
        let mut node = DirectedNode::new("x");
        node.link_child(NodeId::new(GraphId::next(), 0, 0));

        let x = graph.add_node(node).unwrap();
        assert!(graph.children(x).unwrap().is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
