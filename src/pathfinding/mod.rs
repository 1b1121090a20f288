//! Weighted shortest-path finders.
//!
//! Both finders answer `find(graph, source, target)` with the node sequence of
//! a shortest path, endpoints included. An empty sequence means the target is
//! unreachable; that is a normal answer, not an error.
//!
//! | Finder | Preprocessing | Query | Weights |
//! |--------|---------------|-------|---------|
//! | [`DagShortestPathFinder`] | \(O(n + m)\) topological sort, cached | \(O(n + m)\) over the swept range | any, acyclic graphs only |
//! | [`DijkstraPathFinder`] | none | \(O((n + m) \log m)\) | non-negative |

use std::collections::HashMap;

use num_traits::Zero;

use crate::error::GraphResult;
use crate::graph::{Graph, GraphNode, NodeId, WeightFunction};

pub mod dag;
pub mod dijkstra;

pub use dag::DagShortestPathFinder;
pub use dijkstra::DijkstraPathFinder;

/// A shortest-path finder over weighted directed graphs.
pub trait WeightedPathFinder<N: GraphNode> {
    /// Searches a shortest path from `source` to `target` in `graph`.
    ///
    /// Returns the path's nodes in order, or an empty vector if none exists.
    ///
    /// # Errors
    /// Ownership-state errors for endpoints outside `graph`, a missing-data
    /// error if a relaxed arc has no weight, plus finder-specific failures.
    fn find(&mut self, graph: &Graph<N>, source: NodeId, target: NodeId) -> GraphResult<Vec<NodeId>>;
}

/// Follows parent links from `target` back to the root and returns the chain
/// root-first.
pub(crate) fn traceback_path(target: NodeId, parents: &HashMap<NodeId, Option<NodeId>>) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(target);
    while let Some(node) = current {
        path.push(node);
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

/// Total weight of `path`; zero for paths with fewer than two nodes.
///
/// # Errors
/// Fails with a missing-data error if an arc of the path has no weight.
pub fn path_weight<F: WeightFunction>(weights: &F, path: &[NodeId]) -> GraphResult<F::Weight> {
    path.windows(2)
        .try_fold(F::Weight::zero(), |total, arc| Ok(total + weights.weight(arc[0], arc[1])?))
}

/// Returns `true` if every consecutive pair of `path` is an arc of `graph`.
///
/// Empty and single-node paths are trivially valid as long as their nodes are
/// owned by `graph`.
pub fn is_valid_path<N: GraphNode>(graph: &Graph<N>, path: &[NodeId]) -> bool {
    path.iter().all(|&node| graph.contains(node))
        && path
            .windows(2)
            .all(|arc| graph.has_child(arc[0], arc[1]).unwrap_or(false))
}
