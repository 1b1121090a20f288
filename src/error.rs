//! Error types for graph and path-finding operations.
//!
//! Every fallible operation in the crate returns [`GraphResult`]. Errors are
//! raised at the point of violation and never recovered internally; "no path"
//! is *not* an error and is reported as an empty path instead.

use crate::graph::{GraphId, NodeId};
use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Coarse classification of a [`GraphError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A supplied value is unusable (NaN or negative weight, duplicate name).
    InvalidArgument,
    /// A node is unowned, owned by another graph, or paired with a node of another graph.
    OwnershipState,
    /// A requested datum (an arc weight) was never recorded.
    MissingData,
    /// The graph contains a cycle where an acyclic graph is required.
    Cyclicity,
}

/// Errors that can occur during graph operations.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    /// A supplied argument was rejected.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected.
        reason: String,
    },

    /// A node name is already mapped in the target graph.
    #[error("graph {graph} already contains a node named '{name}'")]
    DuplicateName {
        /// The graph that rejected the node.
        graph: GraphId,
        /// The conflicting name.
        name: String,
    },

    /// Dijkstra relaxed an arc with a negative weight.
    #[error("arc ({tail}, {head}) has negative weight {weight}")]
    NegativeWeight {
        /// Tail of the offending arc.
        tail: NodeId,
        /// Head of the offending arc.
        head: NodeId,
        /// The offending weight.
        weight: f64,
    },

    /// The node handle was issued by a different graph.
    #[error("node {node} does not belong to graph {graph}")]
    ForeignNode {
        /// The rejected handle.
        node: NodeId,
        /// The graph the operation was invoked on.
        graph: GraphId,
    },

    /// The node was removed from (or moved out of) the graph that issued the handle.
    #[error("node {node} is not attached to any graph")]
    DetachedNode {
        /// The stale handle.
        node: NodeId,
    },

    /// Two nodes that must share a graph belong to different graphs.
    #[error("nodes {first} and {second} belong to different graphs")]
    MixedGraphs {
        /// First node of the pair.
        first: NodeId,
        /// Second node of the pair.
        second: NodeId,
    },

    /// A finder was invoked with a graph other than the one it was built for.
    #[error("finder was built for graph {expected} but was given graph {found}")]
    GraphMismatch {
        /// The graph the finder is bound to.
        expected: GraphId,
        /// The graph that was supplied.
        found: GraphId,
    },

    /// No weight was recorded for the requested arc.
    #[error("the arc ({tail}, {head}) has no weight in this weight function")]
    MissingWeight {
        /// Tail of the requested arc.
        tail: NodeId,
        /// Head of the requested arc.
        head: NodeId,
    },

    /// The graph contains a cycle.
    #[error("graph {graph} is not acyclic")]
    Cyclic {
        /// The cyclic graph.
        graph: GraphId,
    },
}

impl GraphError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates a duplicate name error.
    pub fn duplicate_name(graph: GraphId, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            graph,
            name: name.into(),
        }
    }

    /// Creates a missing weight error.
    pub fn missing_weight(tail: NodeId, head: NodeId) -> Self {
        Self::MissingWeight { tail, head }
    }

    /// Creates a cyclicity error.
    pub fn cyclic(graph: GraphId) -> Self {
        Self::Cyclic { graph }
    }

    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } | Self::DuplicateName { .. } | Self::NegativeWeight { .. } => {
                ErrorKind::InvalidArgument
            }
            Self::ForeignNode { .. }
            | Self::DetachedNode { .. }
            | Self::MixedGraphs { .. }
            | Self::GraphMismatch { .. } => ErrorKind::OwnershipState,
            Self::MissingWeight { .. } => ErrorKind::MissingData,
            Self::Cyclic { .. } => ErrorKind::Cyclicity,
        }
    }
}
