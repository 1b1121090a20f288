//! Shortest paths in directed acyclic graphs.
//!
//! The finder keeps the graph's topological order cached together with the
//! graph's modification counter at the time it was computed. Every query
//! compares that tag with the live counter and recomputes on mismatch, so the
//! finder stays correct across mutations of the graph between queries.
//!
//! A query is a single forward sweep over the order between the source and the
//! target positions. Every arc points forward in the order, so each node's
//! predecessors are settled before the node itself is reached.

use std::collections::HashMap;

use num_traits::Zero;

use super::{traceback_path, WeightedPathFinder};
use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, GraphId, GraphNode, NodeId, WeightFunction};
use crate::traversal::{topological_sort, TopologicalOrder};

#[derive(Debug, Clone)]
struct TopologicalCache {
    order: TopologicalOrder,
    modification_count: u64,
}

impl TopologicalCache {
    fn build<N: GraphNode>(graph: &Graph<N>) -> GraphResult<Self> {
        let modification_count = graph.modification_count();
        let order = topological_sort(graph)?;
        log_event!(
            debug,
            graph = %graph.id(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            modification_count,
            "computed topological order"
        );
        Ok(Self {
            order,
            modification_count,
        })
    }
}

/// Shortest-path finder for directed acyclic graphs.
#[derive(Debug, Clone)]
pub struct DagShortestPathFinder<'w, F> {
    graph: GraphId,
    weights: &'w F,
    cache: TopologicalCache,
}

impl<'w, F: WeightFunction> DagShortestPathFinder<'w, F> {
    /// Builds a finder for `graph`, computing its topological order up front.
    ///
    /// # Errors
    /// Fails with [`GraphError::Cyclic`] if `graph` contains a cycle.
    pub fn new<N: GraphNode>(graph: &Graph<N>, weights: &'w F) -> GraphResult<Self> {
        Ok(Self {
            graph: graph.id(),
            weights,
            cache: TopologicalCache::build(graph)?,
        })
    }

    /// The graph this finder is bound to.
    pub fn graph_id(&self) -> GraphId {
        self.graph
    }

    /// The cached topological order, as of the last refresh.
    pub fn topological_order(&self) -> &TopologicalOrder {
        &self.cache.order
    }

    /// Returns `true` if `graph` changed since the cached order was computed.
    pub fn is_stale<N: GraphNode>(&self, graph: &Graph<N>) -> bool {
        self.cache.modification_count != graph.modification_count()
    }

    fn refresh<N: GraphNode>(&mut self, graph: &Graph<N>) -> GraphResult<()> {
        if self.is_stale(graph) {
            log_event!(
                debug,
                graph = %self.graph,
                cached = self.cache.modification_count,
                live = graph.modification_count(),
                "topological order is stale"
            );
            self.cache = TopologicalCache::build(graph)?;
        }
        Ok(())
    }

    /// Searches a shortest path from `source` to `target`.
    ///
    /// Returns an empty vector without sweeping when `target` precedes
    /// `source` in the topological order.
    ///
    /// # Errors
    /// - [`GraphError::GraphMismatch`] if `graph` is not the graph this finder was built for.
    /// - Ownership-state errors if either endpoint is not owned by `graph`.
    /// - [`GraphError::Cyclic`] if `graph` became cyclic since the last query.
    /// - [`GraphError::MissingWeight`] if a relaxed arc has no weight.
    pub fn find<N: GraphNode>(
        &mut self,
        graph: &Graph<N>,
        source: NodeId,
        target: NodeId,
    ) -> GraphResult<Vec<NodeId>> {
        if graph.id() != self.graph {
            return Err(GraphError::GraphMismatch {
                expected: self.graph,
                found: graph.id(),
            });
        }
        graph.node(source)?;
        graph.node(target)?;
        self.refresh(graph)?;

        let order = &self.cache.order;
        let source_index = order
            .position(source)
            .ok_or(GraphError::DetachedNode { node: source })?;
        let target_index = order
            .position(target)
            .ok_or(GraphError::DetachedNode { node: target })?;

        if source_index > target_index {
            return Ok(Vec::new());
        }

        let mut distances: HashMap<NodeId, F::Weight> = HashMap::new();
        let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
        distances.insert(source, F::Weight::zero());
        parents.insert(source, None);

        for &current in order.range(source_index, target_index) {
            let Some(&distance) = distances.get(&current) else {
                continue;
            };
            if current == target {
                let path = traceback_path(target, &parents);
                log_event!(trace, %source, %target, hops = path.len(), "dag path found");
                return Ok(path);
            }

            for child in graph.children(current)? {
                let candidate = distance + self.weights.weight(current, child)?;
                if distances.get(&child).map_or(true, |&best| candidate < best) {
                    distances.insert(child, candidate);
                    parents.insert(child, Some(current));
                }
            }
        }

        Ok(Vec::new())
    }
}

impl<N: GraphNode, F: WeightFunction> WeightedPathFinder<N> for DagShortestPathFinder<'_, F> {
    fn find(&mut self, graph: &Graph<N>, source: NodeId, target: NodeId) -> GraphResult<Vec<NodeId>> {
        DagShortestPathFinder::find(self, graph, source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::graph::{DirectedNode, DirectedWeightFunction};

    struct Fixture {
        graph: Graph,
        weights: DirectedWeightFunction,
        ids: Vec<NodeId>,
    }

    // a -> b (1), b -> d (1), a -> c (1), c -> d (5), a -> d (10)
    fn diamond() -> Fixture {
        let mut graph = Graph::new();
        let ids: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|n| graph.add_node(DirectedNode::new(*n)).unwrap())
            .collect();
        let mut weights = DirectedWeightFunction::new();
        for (tail, head, w) in [(0, 1, 1.0), (1, 3, 1.0), (0, 2, 1.0), (2, 3, 5.0), (0, 3, 10.0)] {
            graph.add_child(ids[tail], ids[head]).unwrap();
            weights.put(ids[tail], ids[head], w).unwrap();
        }
        Fixture { graph, weights, ids }
    }

    #[test]
    fn finds_cheapest_route() {
        let f = diamond();
        let mut finder = DagShortestPathFinder::new(&f.graph, &f.weights).unwrap();
        let path = finder.find(&f.graph, f.ids[0], f.ids[3]).unwrap();
        assert_eq!(path, vec![f.ids[0], f.ids[1], f.ids[3]]);
    }

    #[test]
    fn source_equals_target() {
        let f = diamond();
        let mut finder = DagShortestPathFinder::new(&f.graph, &f.weights).unwrap();
        assert_eq!(finder.find(&f.graph, f.ids[2], f.ids[2]).unwrap(), vec![f.ids[2]]);
    }

    #[test]
    fn backwards_query_is_empty() {
        let f = diamond();
        let mut finder = DagShortestPathFinder::new(&f.graph, &f.weights).unwrap();
        assert!(finder.find(&f.graph, f.ids[3], f.ids[0]).unwrap().is_empty());
        // b and c are unordered relative to each other; neither reaches the other.
        assert!(finder.find(&f.graph, f.ids[1], f.ids[2]).unwrap().is_empty());
        assert!(finder.find(&f.graph, f.ids[2], f.ids[1]).unwrap().is_empty());
    }

    #[test]
    fn backwards_query_returns_before_relaxing() {
        let f = diamond();
        let (b, c, d) = (f.ids[1], f.ids[2], f.ids[3]);
        let mut weights = f.weights.clone();
        weights.remove(b, d);

        let mut finder = DagShortestPathFinder::new(&f.graph, &weights).unwrap();
        // Order is a, c, b, d: b comes after c, so no arc out of b is read.
        assert!(finder.topological_order().position(b) > finder.topological_order().position(c));
        assert_eq!(finder.find(&f.graph, b, c), Ok(vec![]));
        // A forward query from b does relax the weightless arc.
        assert_eq!(finder.find(&f.graph, b, d).unwrap_err().kind(), ErrorKind::MissingData);
    }

    #[test]
    fn cache_follows_mutations() {
        let mut f = diamond();
        let (a, b, c, d) = (f.ids[0], f.ids[1], f.ids[2], f.ids[3]);
        let mut finder = DagShortestPathFinder::new(&f.graph, &f.weights).unwrap();
        assert!(!finder.is_stale(&f.graph));

        f.graph.remove_child(b, d).unwrap();
        assert!(finder.is_stale(&f.graph));

        assert_eq!(finder.find(&f.graph, a, d).unwrap(), vec![a, c, d]);
        assert!(!finder.is_stale(&f.graph));
    }

    #[test]
    fn stale_cache_is_rebuilt_on_query() {
        let mut graph = Graph::new();
        let a = graph.add_node(DirectedNode::new("a")).unwrap();
        let b = graph.add_node(DirectedNode::new("b")).unwrap();
        let mut weights = DirectedWeightFunction::new();
        weights.put(b, a, 1.0).unwrap();

        let snapshot_weights = weights.clone();
        let mut finder = DagShortestPathFinder::new(&graph, &snapshot_weights).unwrap();
        assert!(finder.find(&graph, b, a).unwrap().is_empty());

        graph.add_child(b, a).unwrap();
        assert_eq!(finder.find(&graph, b, a).unwrap(), vec![b, a]);
        assert_eq!(finder.topological_order().as_slice(), &[b, a]);
    }

    #[test]
    fn cyclic_graph_is_rejected() {
        let mut graph = Graph::new();
        let z = graph.add_node(DirectedNode::new("z")).unwrap();
        graph.add_child(z, z).unwrap();
        let weights = DirectedWeightFunction::<f64>::new();

        let err = DagShortestPathFinder::new(&graph, &weights).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cyclicity);
    }

    #[test]
    fn graph_turning_cyclic_fails_the_next_query() {
        let mut graph = Graph::new();
        let a = graph.add_node(DirectedNode::new("a")).unwrap();
        let b = graph.add_node(DirectedNode::new("b")).unwrap();
        let weights = DirectedWeightFunction::<f64>::new();
        let mut finder = DagShortestPathFinder::new(&graph, &weights).unwrap();

        graph.add_child(a, b).unwrap();
        graph.add_child(b, a).unwrap();
        assert_eq!(finder.find(&graph, a, b).unwrap_err().kind(), ErrorKind::Cyclicity);
    }

    #[test]
    fn endpoints_must_belong_to_the_bound_graph() {
        let f = diamond();
        let mut other = Graph::new();
        let x = other.add_node(DirectedNode::new("x")).unwrap();
        let mut finder = DagShortestPathFinder::new(&f.graph, &f.weights).unwrap();

        let err = finder.find(&f.graph, x, f.ids[0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OwnershipState);
        assert!(matches!(
            finder.find(&other, x, x),
            Err(GraphError::GraphMismatch { .. })
        ));
    }

    #[test]
    fn missing_weight_propagates() {
        let mut graph = Graph::new();
        let a = graph.add_node(DirectedNode::new("a")).unwrap();
        let b = graph.add_node(DirectedNode::new("b")).unwrap();
        graph.add_child(a, b).unwrap();
        let weights = DirectedWeightFunction::<f64>::new();

        let mut finder = DagShortestPathFinder::new(&graph, &weights).unwrap();
        assert_eq!(finder.find(&graph, a, b).unwrap_err().kind(), ErrorKind::MissingData);
    }

    #[test]
    fn negative_weights_are_fine_in_a_dag() {
        let f = diamond();
        let mut weights = f.weights.clone();
        weights.put(f.ids[2], f.ids[3], -10.0).unwrap();

        let mut finder = DagShortestPathFinder::new(&f.graph, &weights).unwrap();
        let path = finder.find(&f.graph, f.ids[0], f.ids[3]).unwrap();
        assert_eq!(path, vec![f.ids[0], f.ids[2], f.ids[3]]);
    }
}
