#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod graph;
pub mod newtypes;
pub mod pipeline;
pub mod structures;

#[cfg(test)]
mod test_helpers;

pub use graph::{BuildStats, PipelineGraph, build_graph, find_cycle, is_acyclic};
pub use newtypes::{NewtypeError, NodeId};
pub use pipeline::{PipelineAnalysis, PipelineReport, PipelineRequest, is_dag};
pub use structures::{Edge, Extra, Node};

/// Returns the current version of the pipedag-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
