//! Shared test helper functions for constructing test fixtures.
//!
//! This module is compiled only in test builds. Integration tests in
//! `crates/pipedag-core/tests/` define their own local helpers because they
//! link against the non-test library build where this module is not
//! available.

use crate::structures::{Edge, Node};

/// Builds one [`Node`] per id, in order.
pub fn nodes(ids: &[&str]) -> Vec<Node> {
    ids.iter().map(|id| Node::new(*id)).collect()
}

/// Builds one well-formed [`Edge`] per `(source, target)` pair, in order.
pub fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
    pairs.iter().map(|(s, t)| Edge::new(*s, *t)).collect()
}
