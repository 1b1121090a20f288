//! The graph data model: node handles, the node capability contract, the
//! owning graph container and arc weights.
//!
//! - `node`: `GraphId`, `NodeId`, the `GraphNode` trait and `DirectedNode`
//! - `adjacency`: insertion-ordered adjacency sets
//! - `directed`: the `Graph` container
//! - `weight`: asymmetric arc weights

pub mod adjacency;
pub(crate) mod arena;
pub mod directed;
#[cfg(debug_assertions)]
mod invariants;
pub mod node;
pub mod weight;

pub use adjacency::AdjacencySet;
pub use directed::Graph;
pub use node::{DirectedNode, GraphId, GraphNode, NodeId};
pub use weight::{DirectedWeightFunction, WeightFunction};
