/// Graph construction from submitted pipeline records using `petgraph`.
///
/// Wraps a `StableDiGraph` whose node weights are [`NodeId`]s. The graph is
/// built fresh for every check and never mutated afterwards.
///
/// # Two-Pass Construction
///
/// [`build_graph`] runs two passes over the input:
/// 1. **Node pass**: inserts each distinct non-empty id and records the
///    `id → NodeIndex` mapping. Repeated ids collapse to the first
///    occurrence; blank ids are skipped.
/// 2. **Edge pass**: resolves `source`/`target` through the index map and
///    inserts the edge. Malformed edges (missing or empty endpoint) and
///    dangling edges (an endpoint outside the node set) are left out of the
///    adjacency.
///
/// Neither pass fails. Every irregularity is tallied in [`BuildStats`]
/// instead, so callers can log what was absorbed.
///
/// Leaving dangling edges out is observationally identical to keeping them
/// inert: a target outside the node set has no visit state and is never
/// explored, and a source outside the node set is never a traversal root and
/// can never be reached.
///
/// # Cycle Detection
///
/// See the [`cycles`] submodule.
pub mod cycles;

pub use cycles::{find_cycle, is_acyclic};

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::newtypes::NodeId;
use crate::structures::{Edge, Node};

/// Tally of input irregularities absorbed during [`build_graph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Nodes whose id repeated an earlier node's id.
    pub duplicate_nodes: usize,
    /// Nodes with an empty id.
    pub blank_nodes: usize,
    /// Edges with a missing, `null` or empty endpoint.
    pub malformed_edges: usize,
    /// Well-formed edges with at least one endpoint outside the node set.
    pub dangling_edges: usize,
}

/// A directed pipeline graph built from submitted nodes and edges.
///
/// Maintains a `HashMap<NodeId, NodeIndex>` for O(1) lookup of nodes by id.
/// Node indices follow first-occurrence order of the input.
///
/// Construct with [`build_graph`].
#[derive(Debug)]
pub struct PipelineGraph {
    graph: StableDiGraph<NodeId, ()>,
    id_to_index: HashMap<NodeId, NodeIndex>,
    stats: BuildStats,
}

impl PipelineGraph {
    /// Returns the number of distinct nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges that made it into the adjacency.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Looks up the [`NodeIndex`] for a node id.
    ///
    /// Returns `None` if no node with that id exists in the graph.
    pub fn node_index(&self, id: &str) -> Option<&NodeIndex> {
        self.id_to_index.get(id)
    }

    /// Returns the [`NodeId`] stored at `idx`, or `None` if the index is out
    /// of bounds.
    pub fn node_id(&self, idx: NodeIndex) -> Option<&NodeId> {
        self.graph.node_weight(idx)
    }

    /// Returns a reference to the underlying [`StableDiGraph`].
    pub fn graph(&self) -> &StableDiGraph<NodeId, ()> {
        &self.graph
    }

    /// Returns the irregularities absorbed while building this graph.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}

/// Constructs a [`PipelineGraph`] from submitted nodes and edges.
///
/// Construction is O(N + E) where N is node count and E is edge count.
/// See the module documentation for the two-pass process.
pub fn build_graph(nodes: &[Node], edges: &[Edge]) -> PipelineGraph {
    let mut graph: StableDiGraph<NodeId, ()> =
        StableDiGraph::with_capacity(nodes.len(), edges.len());
    let mut id_to_index: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());
    let mut stats = BuildStats::default();

    for node in nodes {
        let Some(id) = node.node_id() else {
            stats.blank_nodes += 1;
            continue;
        };
        if id_to_index.contains_key(&id) {
            stats.duplicate_nodes += 1;
            continue;
        }
        let idx = graph.add_node(id.clone());
        id_to_index.insert(id, idx);
    }

    for edge in edges {
        let Some((source, target)) = edge.endpoints() else {
            stats.malformed_edges += 1;
            continue;
        };
        match (id_to_index.get(&source), id_to_index.get(&target)) {
            (Some(&s), Some(&t)) => {
                graph.add_edge(s, t, ());
            }
            _ => stats.dangling_edges += 1,
        }
    }

    PipelineGraph {
        graph,
        id_to_index,
        stats,
    }
}
