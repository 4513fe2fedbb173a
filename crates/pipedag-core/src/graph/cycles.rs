/// Cycle detection for pipeline graphs.
///
/// # Algorithm Overview
///
/// Three-state depth-first search over a [`PipelineGraph`]. Every node starts
/// [`VisitState::Unvisited`]. Entering a node marks it
/// [`VisitState::InProgress`]; it stays in that state for as long as it sits
/// on the current DFS path. Once all of its successors are exhausted it
/// becomes [`VisitState::Done`].
///
/// Reaching a node that is still `InProgress` means the edge just followed
/// points back at an ancestor on the current path: a cycle. Reaching a `Done`
/// node is a no-op, since its whole reachable subtree was already proven
/// cycle-free. This keeps the total work at O(V + E) even on heavily shared
/// sub-DAGs.
///
/// Roots are taken in node insertion order. Disconnected components are each
/// explored by this outer loop, and the first back edge anywhere
/// short-circuits the whole search.
///
/// The traversal keeps its own stack of frames on the heap, so path length is
/// bounded by memory rather than by the thread's call stack.
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::NodeIndexable;

use crate::graph::PipelineGraph;
use crate::newtypes::NodeId;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Returns `true` if `graph` contains no directed cycle.
///
/// An empty graph is acyclic. A self-loop is a cycle of length one.
pub fn is_acyclic(graph: &PipelineGraph) -> bool {
    first_back_edge(graph.graph()).is_none()
}

/// Returns one directed cycle of `graph`, or `None` if it is acyclic.
///
/// The cycle is listed in traversal order and closed: the first and last
/// entries are the same node. A self-loop on `a` yields `[a, a]`.
///
/// `find_cycle(g).is_none()` holds exactly when [`is_acyclic`] returns
/// `true`.
pub fn find_cycle(graph: &PipelineGraph) -> Option<Vec<NodeId>> {
    let path = first_back_edge(graph.graph())?;
    Some(
        path.into_iter()
            .filter_map(|idx| graph.node_id(idx))
            .cloned()
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Internal: traversal
// ---------------------------------------------------------------------------

/// Per-node traversal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Runs the three-state DFS and returns the closed cycle formed by the first
/// back edge encountered.
///
/// Each stack frame is `(node, successors, next successor index)`. The frames
/// on the stack are exactly the nodes in `InProgress` state, in path order.
fn first_back_edge(g: &StableDiGraph<NodeId, ()>) -> Option<Vec<NodeIndex>> {
    let mut state = vec![VisitState::Unvisited; g.node_bound()];

    for root in g.node_indices() {
        if state[root.index()] != VisitState::Unvisited {
            continue;
        }

        state[root.index()] = VisitState::InProgress;
        let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> =
            vec![(root, successors(g, root), 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, children, next) = frame;
            let node = *node;

            let Some(&child) = children.get(*next) else {
                // All successors explored without a back edge.
                state[node.index()] = VisitState::Done;
                stack.pop();
                continue;
            };
            *next += 1;

            match state[child.index()] {
                VisitState::InProgress => {
                    let start = stack.iter().position(|(n, _, _)| *n == child)?;
                    let mut cycle: Vec<NodeIndex> =
                        stack[start..].iter().map(|(n, _, _)| *n).collect();
                    cycle.push(child);
                    return Some(cycle);
                }
                VisitState::Done => {}
                VisitState::Unvisited => {
                    state[child.index()] = VisitState::InProgress;
                    stack.push((child, successors(g, child), 0));
                }
            }
        }
    }

    None
}

/// Returns the successors of `node` in edge insertion order.
///
/// Every target in the graph is a member of the node set; edges to unknown
/// ids were never inserted.
fn successors(g: &StableDiGraph<NodeId, ()>, node: NodeIndex) -> Vec<NodeIndex> {
    let mut out: Vec<NodeIndex> = g.neighbors(node).collect();
    // petgraph yields outgoing neighbors newest-first.
    out.reverse();
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
