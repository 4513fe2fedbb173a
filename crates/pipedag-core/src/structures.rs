/// Node and Edge records for the pipeline graph data model.
///
/// These are the boundary shapes a caller submits. Key design decisions:
/// - `Node::id` is a plain `String` so that a payload with a blank id is still
///   counted as submitted; blank ids are filtered during graph construction.
/// - `Edge::source` and `Edge::target` are `Option<String>`: an absent, `null`
///   or empty endpoint makes the edge malformed, and malformed edges are
///   dropped rather than rejected.
/// - `#[serde(flatten)] pub extra` preserves any additional attributes a
///   pipeline editor attaches (positions, labels, node kinds). The graph core
///   never reads them.
use serde::{Deserialize, Serialize};

use crate::newtypes::NodeId;

/// Attributes carried alongside the identifying fields.
pub type Extra = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A single node in a submitted pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier of this node within the pipeline.
    pub id: String,

    /// Unknown fields preserved for round-trip fidelity.
    #[serde(flatten)]
    pub extra: Extra,
}

impl Node {
    /// Creates a node with the given id and no extra attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Extra::new(),
        }
    }

    /// Returns the validated identifier, or `None` when the id is empty.
    pub fn node_id(&self) -> Option<NodeId> {
        NodeId::try_from(self.id.as_str()).ok()
    }
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// A directed connection between two nodes in a submitted pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Identifier of the upstream (tail) node.
    #[serde(default)]
    pub source: Option<String>,

    /// Identifier of the downstream (head) node.
    #[serde(default)]
    pub target: Option<String>,

    /// Unknown fields preserved for round-trip fidelity.
    #[serde(flatten)]
    pub extra: Extra,
}

impl Edge {
    /// Creates a well-formed edge `source -> target`.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            extra: Extra::new(),
        }
    }

    /// Returns the `(source, target)` pair when both endpoints are present
    /// and non-empty.
    ///
    /// Returns `None` for a malformed edge.
    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        let source = NodeId::try_from(self.source.as_deref()?).ok()?;
        let target = NodeId::try_from(self.target.as_deref()?).ok()?;
        Some((source, target))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn node_preserves_extra_attributes() {
        let json = r#"{"id":"extract","type":"source","position":{"x":10,"y":20}}"#;
        let node: Node = serde_json::from_str(json).expect("parses");
        assert_eq!(node.id, "extract");
        assert_eq!(node.extra.len(), 2);
        assert!(node.extra.contains_key("position"));

        let back = serde_json::to_value(&node).expect("serializes");
        assert_eq!(back["type"], "source");
        assert_eq!(back["position"]["y"], 20);
    }

    #[test]
    fn node_requires_id() {
        let result: Result<Node, _> = serde_json::from_str(r#"{"type":"source"}"#);
        assert!(result.is_err(), "a node without an id is rejected");
    }

    #[test]
    fn node_blank_id_has_no_node_id() {
        let node = Node::new("");
        assert!(node.node_id().is_none());
    }

    #[test]
    fn edge_with_both_endpoints_is_well_formed() {
        let edge: Edge =
            serde_json::from_str(r#"{"source":"a","target":"b","id":"e1"}"#).expect("parses");
        let (s, t) = edge.endpoints().expect("well-formed");
        assert_eq!(&*s, "a");
        assert_eq!(&*t, "b");
        assert_eq!(edge.extra.get("id"), Some(&serde_json::json!("e1")));
    }

    #[test]
    fn edge_missing_target_is_malformed() {
        let edge: Edge = serde_json::from_str(r#"{"source":"a"}"#).expect("parses");
        assert!(edge.endpoints().is_none());
    }

    #[test]
    fn edge_null_source_is_malformed() {
        let edge: Edge = serde_json::from_str(r#"{"source":null,"target":"b"}"#).expect("parses");
        assert!(edge.endpoints().is_none());
    }

    #[test]
    fn edge_empty_endpoint_is_malformed() {
        let edge = Edge::new("a", "");
        assert!(edge.endpoints().is_none());
    }

    #[test]
    fn edge_self_loop_is_well_formed() {
        let edge = Edge::new("a", "a");
        let (s, t) = edge.endpoints().expect("well-formed");
        assert_eq!(s, t);
    }
}
