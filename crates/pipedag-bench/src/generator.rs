//! Layered pipeline generator.
//!
//! Nodes are arranged in `layers` rows of `width` stages. Every stage outside
//! the first row receives one edge from the row directly above it plus up to
//! `fanout - 1` extra edges from any earlier row, so the result is a DAG in
//! which every stage descends from the first row. With `inject_cycles` set, a
//! few back edges are added from a deep stage to one of its first-row
//! ancestors, each closing a cycle.

use pipedag_core::{Edge, Node, PipelineRequest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for the pipeline generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of rows in the pipeline.
    pub layers: usize,
    /// Stages per row.
    pub width: usize,
    /// Maximum incoming edges per stage outside the first row.
    pub fanout: usize,
    /// Whether to add back edges that close cycles.
    pub inject_cycles: bool,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 50 stages, ~100 edges
    Small,
    /// 1 000 stages, ~2 500 edges
    Medium,
    /// 20 000 stages, ~60 000 edges
    Large,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let (layers, width, fanout) = match self {
            SizeTier::Small => (5, 10, 3),
            SizeTier::Medium => (20, 50, 4),
            SizeTier::Large => (100, 200, 5),
        };
        GeneratorConfig {
            seed,
            layers,
            width,
            fanout,
            inject_cycles: false,
        }
    }
}

/// Generates a pipeline payload from the given configuration.
///
/// All randomness is deterministic, seeded from `config.seed`. A config with
/// zero layers or zero width yields an empty pipeline.
pub fn generate_pipeline(config: &GeneratorConfig) -> PipelineRequest {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let total = config.layers * config.width;

    let nodes: Vec<Node> = (0..total).map(|i| Node::new(stage_id(i))).collect();
    let mut edges: Vec<Edge> = Vec::new();
    // Parent in the previous row, used to walk back to a first-row ancestor.
    let mut spine: Vec<Option<usize>> = vec![None; total];

    for layer in 1..config.layers {
        let row_start = layer * config.width;
        let prev_start = row_start - config.width;
        for target in row_start..row_start + config.width {
            let parent = rng.gen_range(prev_start..row_start);
            spine[target] = Some(parent);
            edges.push(Edge::new(stage_id(parent), stage_id(target)));

            for _ in 1..config.fanout {
                let source = rng.gen_range(0..row_start);
                if source != parent {
                    edges.push(Edge::new(stage_id(source), stage_id(target)));
                }
            }
        }
    }

    if config.inject_cycles && config.layers >= 2 && config.width > 0 {
        inject_cycles(&mut rng, config, &spine, &mut edges);
    }

    PipelineRequest { nodes, edges }
}

/// Adds 1-3 back edges from a stage outside the first row to its first-row
/// ancestor along the spine.
fn inject_cycles(
    rng: &mut StdRng,
    config: &GeneratorConfig,
    spine: &[Option<usize>],
    edges: &mut Vec<Edge>,
) {
    let num_cycles = rng.gen_range(1..=3);
    for _ in 0..num_cycles {
        let from = rng.gen_range(config.width..spine.len());
        let mut root = from;
        while let Some(parent) = spine.get(root).copied().flatten() {
            root = parent;
        }
        edges.push(Edge::new(stage_id(from), stage_id(root)));
    }
}

fn stage_id(index: usize) -> String {
    format!("stage-{index:06}")
}
