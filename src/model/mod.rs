//! Data model for compact phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [CompactTree], a structure-of-arrays store:
//! each node attribute (label, edge length, parent, children) lives in its
//! own contiguous array, and nodes are referenced by [NodeIndex] only.
//! The root's parent is the [NULL_NODE] sentinel.
//!
//! Per-node data is read with O(1) indexed lookups, either all at once via
//! [CompactTree::attributes] (returning [NodeAttributes]) or one attribute
//! at a time.
//!
//! # Traversal
//! See the [iter] module: [PreorderIter] (with begin/end positions),
//! [PostorderIter], [LevelorderIter], and [LeavesIter].
//!
//! # Analyses
//! * [distance]: path lengths between nodes, Robinson-Foulds distance
//!   between trees
//! * [contract]: subtree induced by a set of nodes
//! * [random]: Yule and uniform random binary trees

pub mod contract;
pub mod distance;
pub mod iter;
pub mod random;
pub mod tree;

pub use iter::{LeavesIter, LevelorderIter, PostorderIter, PreorderIter};
pub use tree::{CompactTree, NULL_NODE, NodeAttributes, NodeIndex, TreeError};
