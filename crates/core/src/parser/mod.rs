//! Parser for Mermaid dependency graphs
//!
//! Turns diagram text into a [`Graph`]. Parsing is lenient: blank lines,
//! the `graph ...` declaration, and any line that is not an edge are
//! skipped without error. Lines may end in `\n`, `\r\n` or a bare `\r`.
//!
//! # Node Registration
//!
//! Nodes are registered the first time their ID appears on either side of
//! an edge. The label from that first sighting is kept; later labels for
//! the same ID are ignored. Edges are stored in the order they appear and
//! duplicates are kept.

use std::io::Read;

use tracing::debug;

use crate::error::Result;
use crate::graph::Graph;

pub mod mermaid;

/// Line counts gathered while parsing, for diagnostics only
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ParseStats {
    lines: usize,
    edges: usize,
    skipped: usize,
}

/// Incremental graph builder fed one line at a time
#[derive(Debug, Default)]
struct GraphBuilder {
    graph: Graph,
    stats: ParseStats,
}

impl GraphBuilder {
    fn push_line(&mut self, line: &str) {
        self.stats.lines += 1;

        let raw = line.trim();
        if raw.is_empty() || mermaid::is_declaration(raw) {
            return;
        }

        let Some(edge) = mermaid::parse_edge_line(raw) else {
            self.stats.skipped += 1;
            return;
        };

        let parent = self.graph.add_node(edge.parent_id, edge.parent_label);
        let child = self.graph.add_node(edge.child_id, edge.child_label);
        self.graph.add_edge(parent, child);
        self.stats.edges += 1;
    }

    fn finish(self) -> Graph {
        debug!(
            lines = self.stats.lines,
            edges = self.stats.edges,
            skipped = self.stats.skipped,
            nodes = self.graph.node_count(),
            "parsed dependency graph"
        );
        self.graph
    }
}

/// Parse a sequence of lines into a graph
pub fn parse_lines<I, S>(lines: I) -> Graph
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = GraphBuilder::default();
    for line in lines {
        builder.push_line(line.as_ref());
    }
    builder.finish()
}

/// Parse in-memory diagram text into a graph
///
/// # Example
/// ```
/// use nodedeps_core::parser;
///
/// let graph = parser::parse_str("graph TD\n    A[alpha] --> B[beta]\n");
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub fn parse_str(text: &str) -> Graph {
    parse_lines(split_lines(text))
}

/// Split text on `\r\n`, bare `\r`, and `\n` line endings
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(['\r', '\n']))
}

/// Parse diagram text from a reader
///
/// The whole input is read before parsing so that every line-ending
/// convention is split the same way as [`parse_str`].
///
/// # Errors
/// Returns an error if reading from `reader` fails (including invalid
/// UTF-8). Malformed lines are never an error.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Graph> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse_str(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
graph TD
    N0[app v0.1.0] --> N1[kernel-alloc v0.1.0]
    N0[app v0.1.0] --> N2[log v0.4.0]

    N1[kernel-alloc v0.1.0] --> N2[log v0.4.0]
";

    fn ids(graph: &Graph) -> Vec<String> {
        graph.nodes().map(|n| n.id.clone()).collect()
    }

    fn edge_ids(graph: &Graph) -> Vec<(String, String)> {
        graph
            .edge_endpoints()
            .map(|(p, c)| (graph.node(p).id.clone(), graph.node(c).id.clone()))
            .collect()
    }

    #[test]
    fn test_parse_sample() {
        let graph = parse_str(SAMPLE);

        assert_eq!(ids(&graph), vec!["N0", "N1", "N2"]);
        assert_eq!(
            edge_ids(&graph),
            vec![
                ("N0".to_string(), "N1".to_string()),
                ("N0".to_string(), "N2".to_string()),
                ("N1".to_string(), "N2".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "graph TD\nnot an edge\nA[alpha] --> B[beta]\n%% comment\nC --> D\n";
        let graph = parse_str(text);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_first_label_wins() {
        let text = "A[alpha v1] --> B[beta]\nC[gamma] --> A[alpha v2]\n";
        let graph = parse_str(text);

        let a = graph.find_node_by_id("A").unwrap();
        assert_eq!(graph.node(a).label, "alpha v1");
    }

    #[test]
    fn test_duplicate_edges_kept() {
        let text = "A[alpha] --> B[beta]\nA[alpha] --> B[beta]\n";
        let graph = parse_str(text);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let graph = parse_str("");

        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_parse_reader_matches_parse_str() {
        let from_reader = parse_reader(Cursor::new(SAMPLE)).unwrap();
        let from_str = parse_str(SAMPLE);

        assert_eq!(ids(&from_reader), ids(&from_str));
        assert_eq!(edge_ids(&from_reader), edge_ids(&from_str));
    }

    #[test]
    fn test_parse_reader_handles_crlf() {
        let graph = parse_reader(Cursor::new("graph TD\r\nA[alpha] --> B[beta]\r\n")).unwrap();

        assert_eq!(graph.edge_count(), 1);
        let b = graph.find_node_by_id("B").unwrap();
        assert_eq!(graph.node(b).label, "beta");
    }

    #[test]
    fn test_parse_reader_handles_bare_cr() {
        let graph = parse_reader(Cursor::new("graph TD\rA[alpha] --> B[beta]\r")).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_mixed_line_endings() {
        let text = "graph TD\r\nA[alpha] --> B[beta]\rB[beta] --> C[gamma]\nC[gamma] --> D[delta]";
        let graph = parse_str(text);

        assert_eq!(graph.edge_count(), 3);
        let d = graph.find_node_by_id("D").unwrap();
        assert_eq!(graph.node(d).label, "delta");
    }

    #[test]
    fn test_split_lines_endings() {
        let lines: Vec<_> = split_lines("a\r\nb\rc\nd").collect();

        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_parse_reader_rejects_invalid_utf8() {
        let bytes: &[u8] = &[b'A', b'[', 0xff, b']'];
        let result = parse_reader(Cursor::new(bytes));

        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
