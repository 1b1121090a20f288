//! Arc weights for directed graphs.
//!
//! A weight function is asymmetric: the arcs `(u, v)` and `(v, u)` carry
//! independent weights, and either may be absent. Weights are looked up by the
//! exact ordered pair of handles, so a node that moves to another graph (and
//! therefore receives a new handle) does not carry its weights along.

use std::collections::HashMap;

use num_traits::Float;

use super::node::NodeId;
use crate::error::{GraphError, GraphResult};

/// Read access to arc weights, as consumed by the path finders.
pub trait WeightFunction {
    /// Numeric weight type.
    type Weight: Float;

    /// Weight of the arc `(tail, head)`.
    ///
    /// # Errors
    /// Fails with [`GraphError::MissingWeight`] if no weight was recorded for the arc.
    fn weight(&self, tail: NodeId, head: NodeId) -> GraphResult<Self::Weight>;
}

/// A weight function for directed arcs, backed by a nested hash map
/// `tail -> (head -> weight)`.
#[derive(Debug, Clone)]
pub struct DirectedWeightFunction<W = f64> {
    arcs: HashMap<NodeId, HashMap<NodeId, W>>,
    len: usize,
}

impl<W: Float> DirectedWeightFunction<W> {
    /// Creates an empty weight function.
    pub fn new() -> Self {
        Self {
            arcs: HashMap::new(),
            len: 0,
        }
    }

    /// Number of arcs with a recorded weight.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no weight is recorded.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the weight of the arc `(tail, head)`, overwriting any previous value.
    ///
    /// # Errors
    /// Fails with an invalid-argument error if `weight` is NaN.
    pub fn put(&mut self, tail: NodeId, head: NodeId, weight: W) -> GraphResult<()> {
        if weight.is_nan() {
            return Err(GraphError::invalid_argument("the weight is NaN"));
        }
        if self.arcs.entry(tail).or_default().insert(head, weight).is_none() {
            self.len += 1;
        }
        Ok(())
    }

    /// Weight of the arc `(tail, head)`.
    ///
    /// # Errors
    /// Fails with [`GraphError::MissingWeight`] if no weight was recorded for the
    /// arc, including when `tail` was never used as a tail.
    pub fn get(&self, tail: NodeId, head: NodeId) -> GraphResult<W> {
        self.arcs
            .get(&tail)
            .and_then(|heads| heads.get(&head))
            .copied()
            .ok_or_else(|| GraphError::missing_weight(tail, head))
    }

    /// Forgets the weight of the arc `(tail, head)`, returning it if present.
    pub fn remove(&mut self, tail: NodeId, head: NodeId) -> Option<W> {
        let heads = self.arcs.get_mut(&tail)?;
        let weight = heads.remove(&head)?;
        if heads.is_empty() {
            self.arcs.remove(&tail);
        }
        self.len -= 1;
        Some(weight)
    }

    /// Removes every recorded weight.
    pub fn clear(&mut self) {
        self.arcs.clear();
        self.len = 0;
    }
}

impl<W: Float> Default for DirectedWeightFunction<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Float> WeightFunction for DirectedWeightFunction<W> {
    type Weight = W;

    #[inline]
    fn weight(&self, tail: NodeId, head: NodeId) -> GraphResult<W> {
        self.get(tail, head)
    }
}
