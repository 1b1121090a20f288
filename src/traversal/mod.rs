//! Whole-graph traversals: depth-first search with cycle detection and the
//! topological sort built on it.

pub mod dfs;
pub mod topological;

pub use dfs::{depth_first_search, Color, DepthFirstSearch};
pub use topological::{topological_sort, TopologicalOrder};
