//! Three-colour depth-first search over a whole graph.
//!
//! Roots are taken in the graph's canonical (ascending name) order and children
//! in adjacency insertion order, so the result is fully determined by the graph
//! state. Timestamps follow the classic numbering: one counter shared by
//! discovery and finish, incremented before each stamp, so the first node
//! discovered gets `1` and the last node finished gets `2n`.
//!
//! The traversal keeps its own frame stack instead of recursing; a chain of
//! thousands of nodes costs heap, not call stack.

use crate::graph::{Graph, GraphId, GraphNode, NodeId};

/// Visit state of a node during (and after) a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Not reached yet (white).
    Unvisited,
    /// Discovered, descendants still being explored (gray).
    InProgress,
    /// Fully explored (black).
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Visit {
    node: NodeId,
    color: Color,
    discovered: usize,
    finished: usize,
    parent: Option<NodeId>,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    cursor: usize,
}

/// The outcome of [`depth_first_search`].
///
/// Per-node records are stored densely by arena slot, so lookups are O(1).
#[derive(Debug, Clone)]
pub struct DepthFirstSearch {
    graph: GraphId,
    visits: Vec<Option<Visit>>,
    finish_order: Vec<NodeId>,
    time: usize,
    acyclic: bool,
}

impl DepthFirstSearch {
    fn new(graph: GraphId, slots: usize, nodes: usize) -> Self {
        Self {
            graph,
            visits: vec![None; slots],
            finish_order: Vec::with_capacity(nodes),
            time: 0,
            acyclic: true,
        }
    }

    #[inline]
    fn visit(&self, node: NodeId) -> Option<&Visit> {
        if node.graph_id() != self.graph {
            return None;
        }
        self.visits
            .get(node.index())
            .and_then(Option::as_ref)
            .filter(|visit| visit.node == node)
    }

    fn discover(&mut self, node: NodeId, parent: Option<NodeId>) {
        self.time += 1;
        self.visits[node.index()] = Some(Visit {
            node,
            color: Color::InProgress,
            discovered: self.time,
            finished: 0,
            parent,
        });
    }

    fn finish(&mut self, node: NodeId) {
        self.time += 1;
        if let Some(visit) = self.visits[node.index()].as_mut() {
            visit.color = Color::Done;
            visit.finished = self.time;
        }
        self.finish_order.push(node);
    }

    /// The graph this search ran over.
    pub fn graph_id(&self) -> GraphId {
        self.graph
    }

    /// `false` if a back edge (including a self-loop) was found.
    pub fn is_acyclic(&self) -> bool {
        self.acyclic
    }

    /// Number of nodes visited.
    pub fn len(&self) -> usize {
        self.finish_order.len()
    }

    /// Returns `true` if the graph was empty.
    pub fn is_empty(&self) -> bool {
        self.finish_order.is_empty()
    }

    /// Colour of `node`; [`Color::Unvisited`] for nodes the search never saw.
    pub fn color(&self, node: NodeId) -> Color {
        self.visit(node).map_or(Color::Unvisited, |visit| visit.color)
    }

    /// Discovery timestamp of `node`.
    pub fn discovery_time(&self, node: NodeId) -> Option<usize> {
        self.visit(node).map(|visit| visit.discovered)
    }

    /// Finish timestamp of `node`.
    pub fn finish_time(&self, node: NodeId) -> Option<usize> {
        self.visit(node)
            .filter(|visit| visit.color == Color::Done)
            .map(|visit| visit.finished)
    }

    /// DFS-tree parent of `node`; `None` for roots and unknown nodes.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.visit(node).and_then(|visit| visit.parent)
    }

    /// Nodes in the order they finished (increasing finish time).
    pub fn finish_order(&self) -> &[NodeId] {
        &self.finish_order
    }
}

/// Runs depth-first search over every node of `graph`.
pub fn depth_first_search<N: GraphNode>(graph: &Graph<N>) -> DepthFirstSearch {
    let mut search = DepthFirstSearch::new(graph.id(), graph.slot_count(), graph.node_count());
    let mut stack: Vec<Frame> = Vec::new();

    for root in graph.node_ids() {
        if search.color(root) != Color::Unvisited {
            continue;
        }
        search.discover(root, None);
        stack.push(Frame {
            node: root,
            cursor: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let next = graph
                .children_of(node)
                .and_then(|children| children.get(frame.cursor));

            let Some(child) = next else {
                stack.pop();
                search.finish(node);
                continue;
            };
            frame.cursor += 1;

            match search.color(child) {
                Color::Unvisited => {
                    search.discover(child, Some(node));
                    stack.push(Frame {
                        node: child,
                        cursor: 0,
                    });
                }
                Color::InProgress => search.acyclic = false,
                Color::Done => {}
            }
        }
    }

    search
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DirectedNode;

    #[test]
    fn empty_graph() {
        let graph: Graph = Graph::new();
        let search = depth_first_search(&graph);
        assert!(search.is_empty());
        assert!(search.is_acyclic());
    }

    #[test]
    fn chain_timestamps_nest() {
        let mut graph = Graph::new();
        let a = graph.add_node(DirectedNode::new("a")).unwrap();
        let b = graph.add_node(DirectedNode::new("b")).unwrap();
        let c = graph.add_node(DirectedNode::new("c")).unwrap();
        graph.add_child(a, b).unwrap();
        graph.add_child(b, c).unwrap();

        let search = depth_first_search(&graph);
        assert!(search.is_acyclic());
        assert_eq!(search.discovery_time(a), Some(1));
        assert_eq!(search.discovery_time(b), Some(2));
        assert_eq!(search.discovery_time(c), Some(3));
        assert_eq!(search.finish_time(c), Some(4));
        assert_eq!(search.finish_time(b), Some(5));
        assert_eq!(search.finish_time(a), Some(6));
        assert_eq!(search.parent(c), Some(b));
        assert_eq!(search.parent(a), None);
        assert_eq!(search.finish_order(), &[c, b, a]);
        assert_eq!(search.color(a), Color::Done);
    }

    #[test]
    fn self_loop_is_a_back_edge() {
        let mut graph = Graph::new();
        let z = graph.add_node(DirectedNode::new("z")).unwrap();
        graph.add_child(z, z).unwrap();
        assert!(!depth_first_search(&graph).is_acyclic());
    }

    #[test]
    fn cross_edges_do_not_flag_cycles() {
        // b -> a and c -> a: when c is explored, a is already done.
        let mut graph = Graph::new();
        let a = graph.add_node(DirectedNode::new("a")).unwrap();
        let b = graph.add_node(DirectedNode::new("b")).unwrap();
        let c = graph.add_node(DirectedNode::new("c")).unwrap();
        graph.add_child(b, a).unwrap();
        graph.add_child(c, a).unwrap();
        graph.add_child(c, b).unwrap();

        let search = depth_first_search(&graph);
        assert!(search.is_acyclic());
        assert_eq!(search.len(), 3);
    }

    #[test]
    fn long_chain_does_not_overflow_the_stack() {
        let mut graph = Graph::with_capacity(100_000);
        let mut prev = graph.add_node(DirectedNode::new("n000000")).unwrap();
        for i in 1..100_000 {
            let next = graph.add_node(DirectedNode::new(format!("n{i:06}"))).unwrap();
            graph.add_child(prev, next).unwrap();
            prev = next;
        }

        let search = depth_first_search(&graph);
        assert!(search.is_acyclic());
        assert_eq!(search.finish_time(prev), Some(100_001));
    }

    #[test]
    fn unknown_handles_read_as_unvisited() {
        let mut g1 = Graph::new();
        let mut g2 = Graph::new();
        g1.add_node(DirectedNode::new("a")).unwrap();
        let foreign = g2.add_node(DirectedNode::new("a")).unwrap();

        let search = depth_first_search(&g1);
        assert_eq!(search.color(foreign), Color::Unvisited);
        assert_eq!(search.discovery_time(foreign), None);
    }
}
