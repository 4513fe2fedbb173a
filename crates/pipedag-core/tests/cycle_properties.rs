//! Property-based tests for the cycle checker.
//!
//! Random pipelines (0-24 nodes, 0-60 edges, ids drawn from a pool slightly
//! larger than the node set so dangling edges occur) are checked against
//! `petgraph`'s topological sort as an independent oracle.
#![allow(clippy::expect_used)]

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use pipedag_core::{Edge, Node, PipelineRequest, build_graph, find_cycle, is_acyclic, is_dag};
use proptest::prelude::*;

fn id(i: usize) -> String {
    format!("n-{i}")
}

fn make_nodes(ids: &[usize]) -> Vec<Node> {
    ids.iter().map(|&i| Node::new(id(i))).collect()
}

fn make_edges(pairs: &[(usize, usize)]) -> Vec<Edge> {
    pairs.iter().map(|&(s, t)| Edge::new(id(s), id(t))).collect()
}

/// Oracle: build a graph over member nodes and member-to-member edges only,
/// then ask `toposort` whether an ordering exists.
fn oracle_is_dag(ids: &[usize], pairs: &[(usize, usize)]) -> bool {
    let mut g: DiGraph<usize, ()> = DiGraph::new();
    let mut index = HashMap::new();
    for &i in ids {
        index.entry(i).or_insert_with(|| g.add_node(i));
    }
    for &(s, t) in pairs {
        if let (Some(&a), Some(&b)) = (index.get(&s), index.get(&t)) {
            g.add_edge(a, b, ());
        }
    }
    toposort(&g, None).is_ok()
}

/// Reference checker over raw records: recursive colouring DFS on a map
/// adjacency, skipping edges with a missing or empty endpoint and
/// ignoring neighbours outside the node set.
fn reference_is_dag(nodes: &[Node], edges: &[Edge]) -> bool {
    fn has_cycle<'a>(
        node: &'a str,
        adjacency: &HashMap<&'a str, Vec<&'a str>>,
        state: &mut HashMap<&'a str, u8>,
    ) -> bool {
        match state.get(node).copied() {
            Some(1) => return true,
            Some(2) => return false,
            _ => {}
        }
        state.insert(node, 1);
        for &next in adjacency.get(node).map(Vec::as_slice).unwrap_or_default() {
            if state.contains_key(next) && has_cycle(next, adjacency, state) {
                return true;
            }
        }
        state.insert(node, 2);
        false
    }

    if nodes.is_empty() {
        return true;
    }
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        if let (Some(s), Some(t)) = (edge.source.as_deref(), edge.target.as_deref()) {
            if !s.is_empty() && !t.is_empty() {
                adjacency.entry(s).or_default().push(t);
            }
        }
    }
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut state: HashMap<&str, u8> = ids.iter().map(|&id| (id, 0)).collect();
    ids.iter()
        .all(|&id| state.get(id) != Some(&0) || !has_cycle(id, &adjacency, &mut state))
}

/// A node id or edge endpoint: a pool id, the empty string, or (endpoints
/// only) absent.
fn raw_id(pool: usize) -> impl Strategy<Value = String> {
    prop_oneof![
        8 => (0..pool).prop_map(id),
        1 => Just(String::new()),
    ]
}

fn raw_pipeline() -> impl Strategy<Value = (Vec<Node>, Vec<Edge>)> {
    (0usize..16).prop_flat_map(|n| {
        let pool = n + 2;
        (
            prop::collection::vec(raw_id(pool).prop_map(Node::new), n),
            prop::collection::vec(
                (
                    prop::option::weighted(0.9, raw_id(pool)),
                    prop::option::weighted(0.9, raw_id(pool)),
                )
                    .prop_map(|(source, target)| Edge {
                        source,
                        target,
                        extra: pipedag_core::Extra::new(),
                    }),
                0..40,
            ),
        )
    })
}

fn pipeline() -> impl Strategy<Value = (Vec<usize>, Vec<(usize, usize)>)> {
    (0usize..24).prop_flat_map(|n| {
        let pool = n + 3;
        (
            prop::collection::vec(0..pool, n),
            prop::collection::vec((0..pool, 0..pool), 0..60),
        )
    })
}

/// Edges that only go from a lower to a higher id can never close a cycle.
fn forward_only() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..30).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..80).prop_map(|pairs| {
                pairs
                    .into_iter()
                    .filter(|(s, t)| s < t)
                    .collect::<Vec<_>>()
            }),
        )
    })
}

proptest! {
    #[test]
    fn agrees_with_toposort((ids, pairs) in pipeline()) {
        let expected = oracle_is_dag(&ids, &pairs);
        prop_assert_eq!(is_dag(&make_nodes(&ids), &make_edges(&pairs)), expected);
    }

    #[test]
    fn agrees_with_reference_on_raw_records((nodes, edges) in raw_pipeline()) {
        prop_assert_eq!(is_dag(&nodes, &edges), reference_is_dag(&nodes, &edges));
    }

    #[test]
    fn witness_exists_iff_cyclic((ids, pairs) in pipeline()) {
        let g = build_graph(&make_nodes(&ids), &make_edges(&pairs));
        let cycle = find_cycle(&g);
        prop_assert_eq!(cycle.is_none(), is_acyclic(&g));

        if let Some(cycle) = cycle {
            prop_assert!(cycle.len() >= 2);
            prop_assert_eq!(cycle.first(), cycle.last());
            for pair in cycle.windows(2) {
                let from = *g.node_index(&pair[0]).expect("member");
                let to = *g.node_index(&pair[1]).expect("member");
                prop_assert!(g.graph().contains_edge(from, to));
            }
        }
    }

    #[test]
    fn forward_edges_are_acyclic((n, pairs) in forward_only()) {
        let ids: Vec<usize> = (0..n).collect();
        prop_assert!(is_dag(&make_nodes(&ids), &make_edges(&pairs)));
    }

    #[test]
    fn closing_a_forward_chain_makes_a_cycle(n in 1usize..40) {
        let ids: Vec<usize> = (0..n).collect();
        let mut pairs: Vec<(usize, usize)> = (1..n).map(|i| (i - 1, i)).collect();
        pairs.push((n - 1, 0));
        prop_assert!(!is_dag(&make_nodes(&ids), &make_edges(&pairs)));
    }

    #[test]
    fn report_is_idempotent((ids, pairs) in pipeline()) {
        let req = PipelineRequest { nodes: make_nodes(&ids), edges: make_edges(&pairs) };
        let first = req.report();
        prop_assert_eq!(first, req.report());
        prop_assert_eq!(first.num_nodes, ids.len());
        prop_assert_eq!(first.num_edges, pairs.len());
    }
}
