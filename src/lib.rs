//! Compact-tree is a library to load phylogenetic trees from Newick strings
//! into a compact, pointer-free representation.
//!
//! Core functionality provided:
//! - Newick: Parse single Newick strings, the first tree of a file, or all
//!   trees of a file, with a single-pass, non-recursive parser.
//! - [CompactTree]: Structure-of-arrays store holding per node its label,
//!   incoming edge length, parent, and ordered children. Nodes are dense
//!   [NodeIndex] values; lookups are O(1).
//! - Traversal: restartable preorder iterator with begin/end positions, as
//!   well as postorder, level-order, and leaf iterators.
//! - Analyses: path distances, Robinson-Foulds distance, contraction onto a
//!   set of nodes, and Yule or uniform random trees.
//! - Writing trees back to Newick.
//!
//! Errors are reported as [ParsingError] (malformed input or failed reads,
//! with byte offset and context) and [TreeError] (node index out of range,
//! unusable node sets or leaf labels).
//! Logging goes through the `log` facade; install any logger to see it.
//!
//! # Usage patterns
//! 1. Quick functions with default settings: [parse_newick_str],
//!    [parse_newick_file], or `str::parse::<CompactTree>()`.
//! 2. Configure a [NewickParser](crate::newick::NewickParser) for control
//!    over stored attributes, label handling, and pre-allocation.
//!
//! ## Example
//! ```
//! use compact_tree::{parse_newick_str, NULL_NODE};
//!
//! let tree = parse_newick_str("(A:1,B:2)C;").unwrap();
//! assert_eq!(tree.num_nodes(), 3);
//!
//! let order: Vec<_> = tree.preorder().map(|i| tree.label(i)).collect();
//! assert_eq!(order, ["C", "A", "B"]);
//!
//! let a = tree.attributes(1).unwrap();
//! assert_eq!((a.label, a.edge_length, a.parent), ("A", 1.0, tree.root()));
//! assert_eq!(tree.parent(tree.root()), NULL_NODE);
//! ```
//!
//! ## Example Parser Configuration
//! ```
//! use compact_tree::newick::NewickParser;
//! use compact_tree::parser::ByteParser;
//!
//! let mut parser = NewickParser::new()
//!     .with_capacity(5)          // Pre-allocate for 5 nodes
//!     .with_edge_lengths(false); // Skip storing edge lengths
//!
//! let tree = parser.parse_tree(&mut ByteParser::for_str("((A:1,B:1):2,C:3);"))?;
//! assert_eq!(tree.total_branch_length(), 0.0);
//! # Ok::<(), compact_tree::ParsingError>(())
//! ```

pub mod model;
pub mod newick;
pub mod parser;

pub use crate::model::{CompactTree, NULL_NODE, NodeAttributes, NodeIndex, PreorderIter, TreeError};
pub use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parses a Newick string using default settings, returning a [CompactTree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<CompactTree, ParsingError> {
    newick::parse_str(newick)
}

/// Parses the first tree of a Newick file using default settings.
///
/// See [`newick::parse_file`] for full documentation.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<CompactTree, ParsingError> {
    newick::parse_file(path)
}
