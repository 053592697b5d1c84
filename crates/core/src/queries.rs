//! Dependency queries over a parsed graph
//!
//! A query resolves a human name to a node, walks the graph breadth-first
//! in one direction, and projects the edges that stay inside the reached
//! set.
//!
//! # Depth Bound
//!
//! A neighbor at depth `d` from the root is included only when
//! `d <= max_depth`. A bound of `0` therefore reaches nothing beyond the
//! root itself, and a bound of `1` reaches direct neighbors only.

use std::collections::{HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Which way to follow edges from the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Nodes that depend on the root (follow edges backward)
    Upstream,
    /// Nodes the root depends on (follow edges forward)
    Downstream,
}

impl From<Direction> for petgraph::Direction {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Upstream => petgraph::Direction::Incoming,
            Direction::Downstream => petgraph::Direction::Outgoing,
        }
    }
}

/// A single-root dependency query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Name to resolve against node labels
    pub name: String,
    /// Traversal direction
    pub direction: Direction,
    /// Optional depth bound; `None` means unlimited
    pub max_depth: Option<usize>,
}

/// The induced subgraph produced by a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subgraph {
    /// The resolved root node
    pub root: NodeIndex,
    /// Direction the query followed
    pub direction: Direction,
    /// Reached nodes plus the root
    pub nodes: HashSet<NodeIndex>,
    /// `(parent, child)` edges inside `nodes`, in parse order
    pub edges: Vec<(NodeIndex, NodeIndex)>,
}

/// Normalize a name for comparison: `_` becomes `-`, then lowercase
pub fn normalize_name(name: &str) -> String {
    name.replace('_', "-").to_lowercase()
}

/// Find the node whose canonical name matches `name`
///
/// Matching ignores case and treats `_` and `-` as the same character.
/// When several nodes share a name, the first one registered wins.
///
/// # Errors
/// Returns [`Error::NodeNotFound`] when no node matches.
pub fn resolve_node(graph: &Graph, name: &str) -> Result<NodeIndex> {
    let wanted = normalize_name(name);
    graph
        .node_indices()
        .find(|&idx| normalize_name(graph.node(idx).name()) == wanted)
        .ok_or_else(|| Error::NodeNotFound {
            name: name.to_string(),
        })
}

/// Collect nodes reachable from `start`, excluding `start` itself
///
/// Breadth-first with a FIFO queue of `(node, depth)` pairs. A node already
/// visited when popped is skipped. A neighbor is recorded and queued only if
/// it has not been visited and its depth is within `max_depth`.
pub fn collect_dependencies(
    graph: &Graph,
    start: NodeIndex,
    direction: Direction,
    max_depth: Option<usize>,
) -> HashSet<NodeIndex> {
    let mut reached = HashSet::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([(start, 0usize)]);

    while let Some((current, depth)) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        trace!(node = %graph.node(current).id, depth, "visiting");

        let next_depth = depth + 1;
        if max_depth.is_some_and(|max| next_depth > max) {
            continue;
        }

        for next in graph.neighbors_directed(current, direction.into()) {
            if !visited.contains(&next) {
                reached.insert(next);
                queue.push_back((next, next_depth));
            }
        }
    }

    reached
}

/// Edges whose endpoints are both in `targets`, in parse order
pub fn extract_subgraph_edges(
    graph: &Graph,
    targets: &HashSet<NodeIndex>,
) -> Vec<(NodeIndex, NodeIndex)> {
    graph
        .edge_endpoints()
        .filter(|(parent, child)| targets.contains(parent) && targets.contains(child))
        .collect()
}

/// Run a full query: resolve, traverse, project
///
/// # Errors
/// Returns [`Error::NodeNotFound`] when the query name matches no node.
pub fn extract_subgraph(graph: &Graph, query: &Query) -> Result<Subgraph> {
    let root = resolve_node(graph, &query.name)?;
    debug!(
        name = %query.name,
        root = %graph.node(root).id,
        direction = ?query.direction,
        max_depth = ?query.max_depth,
        "resolved query root"
    );

    let mut nodes = collect_dependencies(graph, root, query.direction, query.max_depth);
    nodes.insert(root);

    let edges = extract_subgraph_edges(graph, &nodes);
    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "extracted subgraph"
    );

    Ok(Subgraph {
        root,
        direction: query.direction,
        nodes,
        edges,
    })
}
