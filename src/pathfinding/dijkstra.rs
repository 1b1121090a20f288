//! Dijkstra's algorithm with a binary heap and lazy deletion.
//!
//! Decrease-key is emulated by pushing a fresh heap entry; entries for nodes
//! that are already settled are skipped when popped. The search stops as soon
//! as the target is popped.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use num_traits::Zero;

use super::{traceback_path, WeightedPathFinder};
use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, GraphNode, NodeId, WeightFunction};

#[derive(Debug, Clone, Copy)]
struct HeapEntry<W> {
    distance: W,
    node: NodeId,
}

impl<W: PartialOrd> Ord for HeapEntry<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; flip so the smallest distance pops first.
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl<W: PartialOrd> PartialOrd for HeapEntry<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: PartialOrd> PartialEq for HeapEntry<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: PartialOrd> Eq for HeapEntry<W> {}

/// Single-pair shortest-path finder for graphs with non-negative weights.
///
/// Unlike [`DagShortestPathFinder`](super::DagShortestPathFinder) it has no
/// preprocessing and handles cycles.
#[derive(Debug, Clone, Copy)]
pub struct DijkstraPathFinder<'w, F> {
    weights: &'w F,
}

impl<'w, F: WeightFunction> DijkstraPathFinder<'w, F> {
    /// Creates a finder reading arc weights from `weights`.
    pub fn new(weights: &'w F) -> Self {
        Self { weights }
    }

    /// Searches a shortest path from `source` to `target`.
    ///
    /// # Errors
    /// - [`GraphError::MixedGraphs`] if the endpoints belong to different graphs.
    /// - Ownership-state errors if either endpoint is not owned by `graph`.
    /// - [`GraphError::MissingWeight`] if a relaxed arc has no weight.
    /// - [`GraphError::NegativeWeight`] if a relaxed arc has a negative weight.
    pub fn find<N: GraphNode>(
        &self,
        graph: &Graph<N>,
        source: NodeId,
        target: NodeId,
    ) -> GraphResult<Vec<NodeId>> {
        if source.graph_id() != target.graph_id() {
            return Err(GraphError::MixedGraphs {
                first: source,
                second: target,
            });
        }
        graph.node(source)?;
        graph.node(target)?;

        let zero = F::Weight::zero();
        let mut open = BinaryHeap::new();
        let mut settled: HashSet<NodeId> = HashSet::new();
        let mut distances: HashMap<NodeId, F::Weight> = HashMap::new();
        let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();

        open.push(HeapEntry {
            distance: zero,
            node: source,
        });
        distances.insert(source, zero);
        parents.insert(source, None);

        while let Some(HeapEntry { node: current, .. }) = open.pop() {
            if current == target {
                let path = traceback_path(target, &parents);
                log_event!(
                    trace,
                    %source,
                    %target,
                    hops = path.len(),
                    settled = settled.len(),
                    "dijkstra path found"
                );
                return Ok(path);
            }
            if !settled.insert(current) {
                continue;
            }
            let Some(&distance) = distances.get(&current) else {
                continue;
            };

            for child in graph.children(current)? {
                if settled.contains(&child) {
                    continue;
                }
                let weight = self.weights.weight(current, child)?;
                if weight < zero {
                    return Err(GraphError::NegativeWeight {
                        tail: current,
                        head: child,
                        weight: num_traits::cast(weight).unwrap_or(f64::NAN),
                    });
                }
                let candidate = distance + weight;
                if distances.get(&child).map_or(true, |&best| candidate < best) {
                    distances.insert(child, candidate);
                    parents.insert(child, Some(current));
                    open.push(HeapEntry {
                        distance: candidate,
                        node: child,
                    });
                }
            }
        }

        Ok(Vec::new())
    }
}

impl<N: GraphNode, F: WeightFunction> WeightedPathFinder<N> for DijkstraPathFinder<'_, F> {
    fn find(&mut self, graph: &Graph<N>, source: NodeId, target: NodeId) -> GraphResult<Vec<NodeId>> {
        DijkstraPathFinder::find(self, graph, source, target)
    }
}
