//! Node identity and the node capability contract.
//!
//! Nodes live inside a graph's arena; callers hold [`NodeId`] handles. A handle
//! records the graph that issued it and the generation of the arena slot, so a
//! handle to a node that has since been removed (or moved to another graph)
//! can be told apart from a live one.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use super::adjacency::AdjacencySet;

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Graph`](super::Graph).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphId(u64);

impl GraphId {
    /// Draws a fresh identity. Never returns the same value twice in a process.
    pub(crate) fn next() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of the identity.
    #[inline(always)]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// A handle to a node owned by a graph.
///
/// Handles are plain values: they can be copied freely, stored in maps and
/// compared. Equality is identity: two handles are equal iff they name the
/// same arena slot, generation and graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    graph: GraphId,
    index: u32,
    generation: u32,
}

impl NodeId {
    #[inline(always)]
    pub(crate) fn new(graph: GraphId, index: u32, generation: u32) -> Self {
        Self {
            graph,
            index,
            generation,
        }
    }

    /// The graph that issued this handle.
    ///
    /// Whether the node is *still* owned by that graph is answered by
    /// [`Graph::contains`](super::Graph::contains).
    #[inline(always)]
    pub fn graph_id(self) -> GraphId {
        self.graph
    }

    /// Arena slot index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Arena slot generation at the time the handle was issued.
    #[inline(always)]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:n{}v{}", self.graph, self.index, self.generation)
    }
}

/// The capability set every graph node provides: identity, adjacency query
/// and adjacency mutation.
///
/// Mutators only touch this node's own sets. Keeping both directions of an arc
/// in sync is the graph's job, which is why user code reaches them through
/// [`Graph::add_child`](super::Graph::add_child) and friends.
pub trait GraphNode {
    /// The node's unique, immutable name.
    fn name(&self) -> &str;

    /// Outgoing neighbours, in insertion order.
    fn children(&self) -> &AdjacencySet;

    /// Incoming neighbours, in insertion order.
    fn parents(&self) -> &AdjacencySet;

    /// Returns `true` if `child` is an outgoing neighbour.
    #[inline]
    fn has_child(&self, child: NodeId) -> bool {
        self.children().contains(child)
    }

    /// Records `child` as an outgoing neighbour. Returns `true` if it was absent.
    fn link_child(&mut self, child: NodeId) -> bool;

    /// Records `parent` as an incoming neighbour. Returns `true` if it was absent.
    fn link_parent(&mut self, parent: NodeId) -> bool;

    /// Forgets the outgoing neighbour `child`. Returns `true` if it was present.
    fn unlink_child(&mut self, child: NodeId) -> bool;

    /// Forgets the incoming neighbour `parent`. Returns `true` if it was present.
    fn unlink_parent(&mut self, parent: NodeId) -> bool;

    /// Empties both adjacency sets, returning `(children, parents)`.
    fn take_adjacency(&mut self) -> (AdjacencySet, AdjacencySet);
}

/// A directed graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectedNode {
    name: String,
    children: AdjacencySet,
    parents: AdjacencySet,
}

impl DirectedNode {
    /// Creates an unowned node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: AdjacencySet::new(),
            parents: AdjacencySet::new(),
        }
    }

    /// Consumes the node, returning its name.
    pub fn into_name(self) -> String {
        self.name
    }
}

impl GraphNode for DirectedNode {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn children(&self) -> &AdjacencySet {
        &self.children
    }

    #[inline]
    fn parents(&self) -> &AdjacencySet {
        &self.parents
    }

    fn link_child(&mut self, child: NodeId) -> bool {
        self.children.insert(child)
    }

    fn link_parent(&mut self, parent: NodeId) -> bool {
        self.parents.insert(parent)
    }

    fn unlink_child(&mut self, child: NodeId) -> bool {
        self.children.remove(child)
    }

    fn unlink_parent(&mut self, parent: NodeId) -> bool {
        self.parents.remove(parent)
    }

    fn take_adjacency(&mut self) -> (AdjacencySet, AdjacencySet) {
        (
            core::mem::take(&mut self.children),
            core::mem::take(&mut self.parents),
        )
    }
}

impl fmt::Display for DirectedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[DirectedNode {}]", self.name)
    }
}
