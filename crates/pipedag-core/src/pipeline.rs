//! Request and report shapes for a pipeline check.
//!
//! [`PipelineRequest`] is the parsed payload: an ordered list of nodes and an
//! ordered list of edges. [`PipelineReport`] is what a caller gets back.
//!
//! The counts in the report are the literal lengths of the submitted lists.
//! Duplicate node ids, malformed edges and dangling edges are all counted;
//! only the DAG verdict looks at the cleaned-up graph.
use serde::{Deserialize, Serialize};

use crate::graph::{BuildStats, build_graph, find_cycle, is_acyclic};
use crate::newtypes::NodeId;
use crate::structures::{Edge, Node};

/// A submitted pipeline: nodes plus directed edges between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRequest {
    /// Nodes in submission order.
    pub nodes: Vec<Node>,
    /// Edges in submission order.
    pub edges: Vec<Edge>,
}

/// Summary returned for a checked pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Number of submitted nodes, before de-duplication.
    pub num_nodes: usize,
    /// Number of submitted edges, including malformed and dangling ones.
    pub num_edges: usize,
    /// Whether the pipeline graph has no directed cycle.
    pub is_dag: bool,
}

/// A [`PipelineReport`] plus the diagnostics gathered while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineAnalysis {
    /// The report sent back to the caller.
    pub report: PipelineReport,
    /// Irregularities absorbed during graph construction.
    pub stats: BuildStats,
    /// One closed cycle when the pipeline is not a DAG.
    pub cycle: Option<Vec<NodeId>>,
}

impl PipelineRequest {
    /// Computes the report for this pipeline.
    pub fn report(&self) -> PipelineReport {
        PipelineReport {
            num_nodes: self.nodes.len(),
            num_edges: self.edges.len(),
            is_dag: is_dag(&self.nodes, &self.edges),
        }
    }

    /// Computes the report along with build statistics and a cycle witness.
    ///
    /// The graph is built once; `report.is_dag` is `true` exactly when
    /// `cycle` is `None`.
    pub fn analyze(&self) -> PipelineAnalysis {
        let graph = build_graph(&self.nodes, &self.edges);
        let cycle = find_cycle(&graph);
        PipelineAnalysis {
            report: PipelineReport {
                num_nodes: self.nodes.len(),
                num_edges: self.edges.len(),
                is_dag: cycle.is_none(),
            },
            stats: graph.stats(),
            cycle,
        }
    }
}

/// Returns `true` if the graph formed by `nodes` and `edges` has no directed
/// cycle.
///
/// Malformed edges are dropped and edges touching ids outside `nodes` are
/// inert. An empty node list is always acyclic.
pub fn is_dag(nodes: &[Node], edges: &[Edge]) -> bool {
    if nodes.is_empty() {
        return true;
    }
    is_acyclic(&build_graph(nodes, edges))
}
