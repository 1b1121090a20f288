//! Topological ordering by decreasing DFS finish time.
//!
//! For every arc `(u, v)` of an acyclic graph, `finish(u) > finish(v)`, so
//! listing nodes by decreasing finish time puts every tail before its head.
//! The finish order recorded by the search is already increasing, so the
//! topological order is its reversal.

use std::collections::HashMap;

use super::dfs::depth_first_search;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, GraphId, GraphNode, NodeId};

/// Nodes of an acyclic graph in topological order, with a position index.
#[derive(Debug, Clone)]
pub struct TopologicalOrder {
    graph: GraphId,
    nodes: Vec<NodeId>,
    positions: HashMap<NodeId, usize>,
}

impl TopologicalOrder {
    fn from_nodes(graph: GraphId, nodes: Vec<NodeId>) -> Self {
        let positions = nodes.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Self {
            graph,
            nodes,
            positions,
        }
    }

    /// The graph this order was computed for.
    pub fn graph_id(&self) -> GraphId {
        self.graph
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph was empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in topological order.
    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Iterates nodes in topological order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Position of `node` in the order.
    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.positions.get(&node).copied()
    }

    /// Nodes at positions `from..=to`. Empty if `from > to`; `to` is clamped to
    /// the last position.
    pub fn range(&self, from: usize, to: usize) -> &[NodeId] {
        if from > to || from >= self.nodes.len() {
            return &[];
        }
        let end = to.min(self.nodes.len() - 1);
        &self.nodes[from..=end]
    }

    /// Consumes the order, returning the node sequence.
    pub fn into_vec(self) -> Vec<NodeId> {
        self.nodes
    }
}

/// Sorts the nodes of `graph` topologically.
///
/// # Errors
/// Fails with [`GraphError::Cyclic`] if the graph contains a cycle, self-loops included.
pub fn topological_sort<N: GraphNode>(graph: &Graph<N>) -> GraphResult<TopologicalOrder> {
    let search = depth_first_search(graph);
    if !search.is_acyclic() {
        return Err(GraphError::cyclic(graph.id()));
    }
    let nodes = search.finish_order().iter().rev().copied().collect();
    Ok(TopologicalOrder::from_nodes(graph.id(), nodes))
}
