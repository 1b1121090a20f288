//! # `dagpath` - Shortest Paths over Owned Directed Graphs
//!
//! A small directed-graph toolkit with two weighted shortest-path finders:
//! a topological-order finder specialised for directed acyclic graphs and a
//! general Dijkstra finder.
//!
//! ## Architecture
//!
//! ### Core Abstractions
//!
//! 1. **Graph container** (`Graph<N>`):
//!    - Owns its nodes in a generational arena and indexes them by unique name
//!    - Iterates nodes in ascending name order, so every traversal is deterministic
//!    - Counts structural modifications; caches keyed on the counter go stale automatically
//!
//! 2. **Node handles** (`NodeId`):
//!    - `Copy` handles tagged with the owning graph and a slot generation
//!    - A handle outlives its node safely: once the node leaves the graph the
//!      handle is *detached* and every operation through it fails with an
//!      ownership-state error instead of touching the wrong node
//!
//! 3. **Traversal engine** (`traversal`):
//!    - Three-colour depth-first search with discovery/finish times and cycle detection
//!    - Topological sort by decreasing finish time
//!    - Explicit frame stack, so long chains never exhaust the call stack
//!
//! 4. **Path finders** (`pathfinding`):
//!    - `DagShortestPathFinder`: single forward sweep over a cached topological order,
//!      refreshed whenever the graph's modification counter moves
//!    - `DijkstraPathFinder`: lazy-deletion binary heap, no preprocessing
//!
//! ### Invariants
//!
//! **Ownership**: a node is owned by at most one graph, and both endpoints of
//! every arc are owned by the same graph.
//!
//! **Edge accounting**: `Graph::edge_count` always equals the sum of all
//! outgoing adjacency sizes.
//!
//! **Topological order**: for every arc `(u, v)` of an acyclic graph,
//! `position(u) < position(v)`.
//!
//! ## Example
//!
//! ```rust
//! use dagpath::{DagShortestPathFinder, DirectedNode, DirectedWeightFunction, Graph};
//!
//! # fn main() -> dagpath::GraphResult<()> {
//! let mut graph = Graph::new();
//! let a = graph.add_node(DirectedNode::new("a"))?;
//! let b = graph.add_node(DirectedNode::new("b"))?;
//! let c = graph.add_node(DirectedNode::new("c"))?;
//!
//! let mut weights = DirectedWeightFunction::new();
//! graph.add_child(a, b)?;
//! graph.add_child(b, c)?;
//! graph.add_child(a, c)?;
//! weights.put(a, b, 1.0)?;
//! weights.put(b, c, 1.0)?;
//! weights.put(a, c, 5.0)?;
//!
//! let mut finder = DagShortestPathFinder::new(&graph, &weights)?;
//! assert_eq!(finder.find(&graph, a, c)?, vec![a, b, c]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

/// Emits a `tracing` event when the `tracing` feature is enabled; expands to
/// nothing otherwise.
macro_rules! log_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            tracing::$level!($($arg)+);
        }
    };
}

pub mod error;
pub mod graph;
pub mod pathfinding;
pub mod traversal;

pub use error::{ErrorKind, GraphError, GraphResult};
pub use graph::{
    AdjacencySet, DirectedNode, DirectedWeightFunction, Graph, GraphId, GraphNode, NodeId,
    WeightFunction,
};
pub use pathfinding::{DagShortestPathFinder, DijkstraPathFinder, WeightedPathFinder};
pub use traversal::{depth_first_search, topological_sort, Color, DepthFirstSearch, TopologicalOrder};

// Handles are passed by value everywhere; keep them two words wide.
const _: () = {
    use core::mem;

    assert!(mem::size_of::<NodeId>() == 16);
    assert!(mem::size_of::<GraphId>() == mem::size_of::<u64>());
};
