//! Debug-only structural invariant checks for [`Graph`].
//!
//! These walk the whole graph, so they are meant for tests and debugging
//! sessions rather than for every mutation. The module only exists in builds
//! with debug assertions enabled.

use super::directed::Graph;
use super::node::GraphNode;

#[inline(always)]
fn holds(condition: bool, message: &str) -> bool {
    if !condition {
        log_event!(error, invariant = message, "graph invariant violated");
        #[cfg(not(feature = "tracing"))]
        let _ = message;
    }
    condition
}

impl<N: GraphNode> Graph<N> {
    /// Validates the structural invariants of the graph.
    ///
    /// This method checks that:
    /// 1. Every named node resolves to a live arena slot carrying that name
    /// 2. Every arc endpoint is owned by this graph
    /// 3. Every child link is mirrored by a parent link and vice versa
    /// 4. The cached edge count equals the sum of all outgoing set sizes
    ///
    /// Returns `true` if all invariants hold.
    pub fn validate_invariants(&self) -> bool {
        let mut outgoing = 0usize;
        let mut visited = 0usize;

        for (id, node) in self.iter() {
            visited += 1;
            if !holds(self.get(node.name()) == Some(id), "name map must point at the node") {
                return false;
            }

            for child in node.children() {
                let mirrored = self.node(child).is_ok_and(|c| c.parents().contains(id));
                if !holds(mirrored, "child link must be mirrored by a parent link") {
                    return false;
                }
            }
            for parent in node.parents() {
                let mirrored = self.node(parent).is_ok_and(|p| p.children().contains(id));
                if !holds(mirrored, "parent link must be mirrored by a child link") {
                    return false;
                }
            }
            outgoing += node.children().len();
        }

        holds(visited == self.node_count(), "every arena node must be named")
            && holds(outgoing == self.edge_count(), "edge count must equal total out-degree")
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{DirectedNode, Graph};

    #[test]
    fn invariants_hold_through_mutations() {
        let mut graph = Graph::new();
        let a = graph.add_node(DirectedNode::new("a")).unwrap();
        let b = graph.add_node(DirectedNode::new("b")).unwrap();
        let c = graph.add_node(DirectedNode::new("c")).unwrap();
        assert!(graph.validate_invariants());

        graph.add_child(a, b).unwrap();
        graph.add_child(b, c).unwrap();
        graph.add_child(c, c).unwrap();
        graph.add_child(a, c).unwrap();
        assert!(graph.validate_invariants());

        graph.remove_child(a, b).unwrap();
        assert!(graph.validate_invariants());

        graph.clear_node(c).unwrap();
        assert!(graph.validate_invariants());

        graph.remove_node(b);
        assert!(graph.validate_invariants());

        graph.clear();
        assert!(graph.validate_invariants());
    }
}
