//! Graph data structures for dependency tracking
//!
//! Uses `petgraph::StableGraph` so that node and edge indices follow
//! insertion order. Node iteration is first-sighting order and edge
//! iteration is parse order, which keeps rendered output deterministic.

use std::collections::HashMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::Serialize;

/// A node in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Diagram identifier (e.g., "N3")
    pub id: String,
    /// Free-text label (e.g., "kernel-alloc v0.1.0")
    pub label: String,
}

impl Node {
    /// Create a node from an identifier and label
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Canonical name: the first whitespace-delimited token of the label
    ///
    /// A label made only of whitespace has an empty name.
    pub fn name(&self) -> &str {
        self.label.split_whitespace().next().unwrap_or("")
    }
}

/// The dependency graph
///
/// Edges point from parent to child. Duplicate edges are kept.
#[derive(Debug, Clone)]
pub struct Graph {
    /// The underlying stable graph (private to enforce encapsulation)
    inner: StableGraph<Node, ()>,

    /// Maps node IDs to their NodeIndex for O(1) lookups
    node_id_map: HashMap<String, NodeIndex>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            inner: StableGraph::new(),
            node_id_map: HashMap::new(),
        }
    }

    /// Register a node, or return the existing one with the same ID
    ///
    /// The first label seen for an ID wins; later labels are ignored.
    pub fn add_node(&mut self, id: &str, label: &str) -> NodeIndex {
        if let Some(&existing) = self.node_id_map.get(id) {
            return existing;
        }
        let index = self.inner.add_node(Node::new(id, label));
        self.node_id_map.insert(id.to_string(), index);
        index
    }

    /// Add a parent → child edge between two registered nodes
    pub fn add_edge(&mut self, parent: NodeIndex, child: NodeIndex) -> EdgeIndex {
        self.inner.add_edge(parent, child, ())
    }

    /// Get a node by index
    ///
    /// # Panics
    /// Panics if `index` does not belong to this graph.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.inner[index]
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Get the number of edges in the graph, duplicates included
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner.node_weights()
    }

    /// Get all node indices in insertion order
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.inner.node_indices()
    }

    /// Iterate over `(parent, child)` pairs in parse order
    pub fn edge_endpoints(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.inner
            .edge_references()
            .map(|e| (e.source(), e.target()))
    }

    /// Nodes one edge away from `index` in the given petgraph direction
    ///
    /// `Outgoing` yields children, `Incoming` yields parents. A neighbor
    /// appears once per connecting edge.
    pub fn neighbors_directed(
        &self,
        index: NodeIndex,
        direction: petgraph::Direction,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.inner.neighbors_directed(index, direction)
    }

    /// Find a node by its ID
    pub fn find_node_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.node_id_map.get(id).copied()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_first_label_wins() {
        let mut graph = Graph::new();
        let first = graph.add_node("A", "alpha v1");
        let second = graph.add_node("A", "other v2");

        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node(first).label, "alpha v1");
    }

    #[test]
    fn test_duplicate_edges_preserved_in_order() {
        let mut graph = Graph::new();
        let a = graph.add_node("A", "alpha");
        let b = graph.add_node("B", "beta");
        graph.add_edge(a, b);
        graph.add_edge(b, a);
        graph.add_edge(a, b);

        let edges: Vec<_> = graph.edge_endpoints().collect();
        assert_eq!(edges, vec![(a, b), (b, a), (a, b)]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_nodes_iterate_in_insertion_order() {
        let mut graph = Graph::new();
        graph.add_node("Z", "zeta");
        graph.add_node("A", "alpha");
        graph.add_node("M", "mu");

        let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_neighbors_directed() {
        let mut graph = Graph::new();
        let a = graph.add_node("A", "alpha");
        let b = graph.add_node("B", "beta");
        let c = graph.add_node("C", "gamma");
        graph.add_edge(a, b);
        graph.add_edge(c, b);

        let mut parents: Vec<_> = graph
            .neighbors_directed(b, petgraph::Direction::Incoming)
            .collect();
        parents.sort();
        assert_eq!(parents, vec![a, c]);

        let children: Vec<_> = graph
            .neighbors_directed(a, petgraph::Direction::Outgoing)
            .collect();
        assert_eq!(children, vec![b]);
    }

    #[test]
    fn test_find_node_by_id() {
        let mut graph = Graph::new();
        let a = graph.add_node("A", "alpha");

        assert_eq!(graph.find_node_by_id("A"), Some(a));
        assert_eq!(graph.find_node_by_id("B"), None);
    }

    #[test]
    fn test_node_name_is_first_label_token() {
        assert_eq!(Node::new("N1", "kernel-alloc v0.1.0").name(), "kernel-alloc");
        assert_eq!(Node::new("N1", "  padded  name ").name(), "padded");
        assert_eq!(Node::new("N1", "solo").name(), "solo");
        assert_eq!(Node::new("N1", "   ").name(), "");
    }

    #[test]
    fn test_graph_default() {
        let graph = Graph::default();

        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}
