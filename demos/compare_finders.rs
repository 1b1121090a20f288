//! Builds a large random layered DAG and races the two path finders on it.
//!
//! ```text
//! DAGPATH_SEED=7 DAGPATH_LAYERS=2000 RUST_LOG=debug cargo run --release --example compare_finders
//! ```

use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use dagpath::pathfinding::{is_valid_path, path_weight};
use dagpath::{DagShortestPathFinder, DijkstraPathFinder, DirectedNode, DirectedWeightFunction, Graph, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const LAYERS: usize = 5000;
const MAX_LAYER_WIDTH: usize = 10;
const MAX_PROCEED: usize = 15;
const EDGE_PROBABILITY: f64 = 0.001;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw.parse().with_context(|| format!("{key}={raw:?} is not valid")),
        Err(_) => Ok(default),
    }
}

fn build(rng: &mut StdRng, layers: usize) -> Result<(Graph, DirectedWeightFunction<f32>, NodeId, NodeId)> {
    let mut graph = Graph::with_capacity(layers * MAX_LAYER_WIDTH / 2);
    let mut weights = DirectedWeightFunction::new();

    let mut nodes: Vec<Vec<NodeId>> = Vec::with_capacity(layers);
    for layer in 0..layers {
        let width = rng.gen_range(1..=MAX_LAYER_WIDTH);
        let row = (0..width)
            .map(|i| graph.add_node(DirectedNode::new(format!("{layer:06}_{i:02}"))))
            .collect::<Result<Vec<_>, _>>()?;
        nodes.push(row);
    }

    for a in 0..layers {
        for b in a..layers.min(a + MAX_PROCEED + 1) {
            for (i, &tail) in nodes[a].iter().enumerate() {
                let heads = if a == b { &nodes[b][i + 1..] } else { &nodes[b][..] };
                for &head in heads {
                    if rng.gen_bool(EDGE_PROBABILITY) {
                        graph.add_child(tail, head)?;
                        weights.put(tail, head, rng.gen::<f32>())?;
                    }
                }
            }
        }
    }

    let source = nodes[0][0];
    let target = *nodes[layers - 1].last().context("empty layer")?;
    Ok((graph, weights, source, target))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let seed = env_or("DAGPATH_SEED", rand::random::<u64>())?;
    let layers = env_or("DAGPATH_LAYERS", LAYERS)?.max(1);
    info!(seed, layers, "building random layered DAG");

    let mut rng = StdRng::seed_from_u64(seed);
    let (graph, weights, source, target) = build(&mut rng, layers)?;
    info!(nodes = graph.node_count(), edges = graph.edge_count(), "graph built");

    let started = Instant::now();
    let mut dag_finder = DagShortestPathFinder::new(&graph, &weights)?;
    info!(elapsed = ?started.elapsed(), "DAG preprocessing");

    let started = Instant::now();
    let dag_path = dag_finder.find(&graph, source, target)?;
    info!(elapsed = ?started.elapsed(), hops = dag_path.len(), "DAG finder");

    let started = Instant::now();
    let dijkstra_path = DijkstraPathFinder::new(&weights).find(&graph, source, target)?;
    info!(elapsed = ?started.elapsed(), hops = dijkstra_path.len(), "Dijkstra finder");

    let valid = is_valid_path(&graph, &dag_path) && is_valid_path(&graph, &dijkstra_path);
    let identical = dag_path == dijkstra_path;
    if dag_path.is_empty() {
        info!("target is unreachable from source");
    } else {
        info!(
            dag_cost = path_weight(&weights, &dag_path)?,
            dijkstra_cost = path_weight(&weights, &dijkstra_path)?,
            "path costs"
        );
    }
    if valid && identical {
        info!("paths are valid and identical");
    } else {
        warn!(valid, identical, "finders disagree");
    }
    Ok(())
}
