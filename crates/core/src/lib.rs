//! nodedeps Core Library
//!
//! This library parses Mermaid dependency graphs and extracts the subgraph
//! reachable from a named node, upstream or downstream, optionally bounded
//! by depth.
//!
//! # Example
//!
//! ```
//! use nodedeps_core::{parser, queries, render, Direction, Query};
//!
//! let graph = parser::parse_str("A[alpha] --> B[beta]\nB[beta] --> C[gamma]\n");
//! let query = Query {
//!     name: "alpha".to_string(),
//!     direction: Direction::Downstream,
//!     max_depth: Some(1),
//! };
//! let subgraph = queries::extract_subgraph(&graph, &query).unwrap();
//!
//! assert_eq!(
//!     render::to_mermaid(&graph, &subgraph.edges),
//!     "graph TD\n    A[alpha] --> B[beta]\n"
//! );
//! ```

pub mod error;
pub mod graph;
pub mod parser;
pub mod queries;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use graph::{Graph, Node};
pub use queries::{Direction, Query, Subgraph};
