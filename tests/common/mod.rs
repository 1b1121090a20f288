//! Random layered DAGs shared by the integration tests and the benchmark.
#![allow(dead_code)]

use dagpath::{DirectedNode, DirectedWeightFunction, Graph, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of a random layered DAG.
#[derive(Debug, Clone, Copy)]
pub struct LayeredDagConfig {
    pub layers: usize,
    pub max_layer_width: usize,
    pub max_proceed: usize,
    pub edge_probability: f64,
}

impl LayeredDagConfig {
    pub const fn small() -> Self {
        Self {
            layers: 40,
            max_layer_width: 6,
            max_proceed: 4,
            edge_probability: 0.2,
        }
    }
}

pub struct LayeredDag {
    pub graph: Graph,
    pub weights: DirectedWeightFunction,
    pub layers: Vec<Vec<NodeId>>,
}

impl LayeredDag {
    pub fn source(&self) -> NodeId {
        self.layers[0][0]
    }

    pub fn target(&self) -> NodeId {
        *self.layers[self.layers.len() - 1].last().unwrap()
    }
}

/// Builds a DAG whose arcs only point to a later layer (at most
/// `max_proceed` layers ahead) or to a later node of the same layer.
pub fn layered_dag(seed: u64, config: LayeredDagConfig) -> LayeredDag {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();
    let mut weights = DirectedWeightFunction::new();

    let layers: Vec<Vec<NodeId>> = (0..config.layers)
        .map(|layer| {
            let width = rng.gen_range(1..=config.max_layer_width);
            (0..width)
                .map(|i| {
                    graph
                        .add_node(DirectedNode::new(format!("{layer:06}_{i:03}")))
                        .unwrap()
                })
                .collect()
        })
        .collect();

    for (a, tails) in layers.iter().enumerate() {
        let last = (a + config.max_proceed).min(layers.len() - 1);
        for (b, heads) in layers.iter().enumerate().take(last + 1).skip(a) {
            for (i, &tail) in tails.iter().enumerate() {
                for (j, &head) in heads.iter().enumerate() {
                    if a == b && j <= i {
                        continue;
                    }
                    if rng.gen_bool(config.edge_probability) {
                        graph.add_child(tail, head).unwrap();
                        weights.put(tail, head, rng.gen::<f64>()).unwrap();
                    }
                }
            }
        }
    }

    LayeredDag {
        graph,
        weights,
        layers,
    }
}
