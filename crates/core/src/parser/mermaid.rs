//! Mermaid flowchart edge-line syntax
//!
//! Only the `<id>[<label>] --> <id>[<label>]` edge form is understood.
//! Everything else is reported as "not an edge" and left to the caller.

use std::sync::OnceLock;

use regex::Regex;

/// Keyword that opens a graph declaration line (e.g., `graph TD`)
pub const DECLARATION_KEYWORD: &str = "graph ";

/// The four captured parts of an edge line, borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLine<'a> {
    pub parent_id: &'a str,
    pub parent_label: &'a str,
    pub child_id: &'a str,
    pub child_label: &'a str,
}

fn edge_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\S+)\[(.+?)\]\s*-->\s*(\S+)\[(.+?)\]\s*$")
            .expect("edge-line regex must compile")
    })
}

/// Whether a trimmed line is the graph declaration header
pub fn is_declaration(line: &str) -> bool {
    line.starts_with(DECLARATION_KEYWORD)
}

/// Match a single line against the edge pattern
///
/// Labels are captured non-greedily up to the closing bracket and must be
/// non-empty. Returns `None` for anything that is not an edge.
pub fn parse_edge_line(line: &str) -> Option<EdgeLine<'_>> {
    let caps = edge_line_re().captures(line)?;
    Some(EdgeLine {
        parent_id: caps.get(1)?.as_str(),
        parent_label: caps.get(2)?.as_str(),
        child_id: caps.get(3)?.as_str(),
        child_label: caps.get(4)?.as_str(),
    })
}
