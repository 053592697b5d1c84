//! Rendering of extracted subgraphs
//!
//! Mermaid output mirrors the input format so an extraction can be fed
//! back into the parser. JSON output is for tooling.

use petgraph::stable_graph::NodeIndex;
use serde::Serialize;

use crate::error::Result;
use crate::graph::{Graph, Node};
use crate::queries::{Direction, Subgraph};

/// Header line written at the top of every Mermaid document
pub const MERMAID_HEADER: &str = "graph TD";

/// Indentation before each edge line
const EDGE_INDENT: &str = "    ";

/// Render edges as a Mermaid document, one edge per line
///
/// Labels are looked up by ID from `graph`. Output always ends in a newline.
pub fn to_mermaid(graph: &Graph, edges: &[(NodeIndex, NodeIndex)]) -> String {
    let mut out = String::from(MERMAID_HEADER);
    out.push('\n');
    for &(parent, child) in edges {
        let parent = graph.node(parent);
        let child = graph.node(child);
        out.push_str(&format!(
            "{EDGE_INDENT}{}[{}] --> {}[{}]\n",
            parent.id, parent.label, child.id, child.label
        ));
    }
    out
}

#[derive(Serialize)]
struct SubgraphDocument<'a> {
    root: &'a str,
    direction: Direction,
    nodes: Vec<&'a Node>,
    edges: Vec<EdgeRecord<'a>>,
}

#[derive(Serialize)]
struct EdgeRecord<'a> {
    parent: &'a str,
    child: &'a str,
}

/// Render a subgraph as a pretty-printed JSON document
///
/// Nodes appear in the order they were first seen in the input; edges in
/// parse order.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_json(graph: &Graph, subgraph: &Subgraph) -> Result<String> {
    let document = SubgraphDocument {
        root: &graph.node(subgraph.root).id,
        direction: subgraph.direction,
        nodes: graph
            .node_indices()
            .filter(|idx| subgraph.nodes.contains(idx))
            .map(|idx| graph.node(idx))
            .collect(),
        edges: subgraph
            .edges
            .iter()
            .map(|&(parent, child)| EdgeRecord {
                parent: &graph.node(parent).id,
                child: &graph.node(child).id,
            })
            .collect(),
    };

    let mut json = serde_json::to_string_pretty(&document)?;
    json.push('\n');
    Ok(json)
}
