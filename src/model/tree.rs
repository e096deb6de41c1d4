//! Provides the compact tree representation.
//!
//! Core data structures:
//! * [CompactTree] - structure-of-arrays tree store
//! * [NodeAttributes] - read-only view of one node's attributes
//! * [NodeIndex] as type used to index nodes, [NULL_NODE] as "no node"
//! * [TreeError] for invalid lookups and node sets

use crate::newick;
use crate::parser::ParsingError;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Index of a node in a tree.
pub type NodeIndex = usize;

/// Null index sentinel, e.g. the parent of the root.
///
/// Never a valid node index, since a tree can not hold `usize::MAX` nodes.
pub const NULL_NODE: NodeIndex = usize::MAX;

/// Error raised by checked node lookups and by operations on node sets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    /// Node index outside of `0..num_nodes`.
    #[error("Node index {index} out of range for tree with {num_nodes} nodes")]
    OutOfRange { index: NodeIndex, num_nodes: usize },

    /// An operation on a set of nodes got an empty set.
    #[error("Expected at least one node")]
    EmptyNodeSet,

    /// A leaf label is empty or shared by several leaves, so leaves can not
    /// be matched by label.
    #[error("Leaf label {0:?} is missing or not unique")]
    AmbiguousLeafLabel(String),

    /// Two trees compared by leaf labels do not have the same leaf labels.
    #[error("Trees have different sets of leaf labels")]
    LeafSetMismatch,
}

// =$========================================================================$=
// COMPACT TREE
// =$========================================================================$=
/// A rooted, labeled, branch-weighted tree stored as parallel arrays.
///
/// Every node is identified by a dense [NodeIndex] and all its attributes
/// live in one array per attribute: label, length of the incoming edge,
/// parent, and ordered children. No node holds a reference to another node,
/// only indices.
///
/// # Structure
/// - Indices are assigned in the order nodes are discovered while parsing,
///   so the root is always `0` for parsed trees. No other assumption on
///   the order of indices holds.
/// - An empty label means "no label"; a missing edge length is stored as `0.0`.
/// - The parent of the root is [NULL_NODE].
/// - Children are kept in their order of appearance in the Newick string.
///
/// The tree is immutable once built. Obtain one by parsing, e.g. with
/// [CompactTree::from_file], [str::parse], or a configured
/// [NewickParser](crate::newick::NewickParser).
///
/// # Example
/// ```
/// use compact_tree::{CompactTree, NULL_NODE};
///
/// let tree: CompactTree = "(A:1,B:2)C;".parse().unwrap();
/// let root = tree.attributes(tree.root()).unwrap();
/// assert_eq!(root.label, "C");
/// assert_eq!(root.parent, NULL_NODE);
/// assert_eq!(root.children.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompactTree {
    /// Label of each node, empty if unlabeled
    labels: Vec<String>,

    /// Length of the incoming edge of each node
    edge_lengths: Vec<f64>,

    /// Whether the edge length of each node was given in the source
    edge_length_given: Vec<bool>,

    /// Parent of each node, [NULL_NODE] for the root
    parents: Vec<NodeIndex>,

    /// Ordered children of each node
    children: Vec<Vec<NodeIndex>>,

    /// Whether any node had a non-empty label in the source
    has_labels: bool,

    /// Whether any node had an edge length in the source
    has_edge_lengths: bool,
}

/// Read-only view of all attributes of one node.
///
/// Borrows from the [CompactTree]; nothing is copied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeAttributes<'a> {
    /// Index of the node
    pub index: NodeIndex,
    /// Label, empty if the node is unlabeled
    pub label: &'a str,
    /// Length of the edge to the parent (`0.0` if absent)
    pub edge_length: f64,
    /// Parent index, [NULL_NODE] for the root
    pub parent: NodeIndex,
    /// Children in order of appearance
    pub children: &'a [NodeIndex],
}

// ============================================================================
// Construction (crate)
// ============================================================================
impl CompactTree {
    /// Creates a tree holding only an unlabeled root, reserving space for
    /// `capacity` nodes in each array.
    pub(crate) fn with_root(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut tree = CompactTree {
            labels: Vec::with_capacity(capacity),
            edge_lengths: Vec::with_capacity(capacity),
            edge_length_given: Vec::with_capacity(capacity),
            parents: Vec::with_capacity(capacity),
            children: Vec::with_capacity(capacity),
            has_labels: false,
            has_edge_lengths: false,
        };
        tree.push_node(NULL_NODE);
        tree
    }

    /// Appends a new unlabeled child to `parent`, returning its index.
    pub(crate) fn add_child(&mut self, parent: NodeIndex) -> NodeIndex {
        let index = self.push_node(parent);
        self.children[parent].push(index);
        index
    }

    pub(crate) fn set_label(&mut self, index: NodeIndex, label: String) {
        if !label.is_empty() {
            self.has_labels = true;
        }
        self.labels[index] = label;
    }

    pub(crate) fn set_edge_length(&mut self, index: NodeIndex, edge_length: f64) {
        self.has_edge_lengths = true;
        self.edge_lengths[index] = edge_length;
        self.edge_length_given[index] = true;
    }

    /// Releases spare capacity once parsing is done.
    pub(crate) fn shrink_to_fit(&mut self) {
        self.labels.shrink_to_fit();
        self.edge_lengths.shrink_to_fit();
        self.edge_length_given.shrink_to_fit();
        self.parents.shrink_to_fit();
        self.children.shrink_to_fit();
    }

    fn push_node(&mut self, parent: NodeIndex) -> NodeIndex {
        let index = self.parents.len();
        self.labels.push(String::new());
        self.edge_lengths.push(0.0);
        self.edge_length_given.push(false);
        self.parents.push(parent);
        self.children.push(Vec::new());
        index
    }
}

// ============================================================================
// Construction (pub)
// ============================================================================
impl CompactTree {
    /// Parses the first Newick tree of the file at `path` with default
    /// settings.
    ///
    /// # Errors
    /// Returns a [ParsingError] if the file can not be read or its first
    /// tree is not valid Newick.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        newick::parse_file(path)
    }

    /// Returns the Newick string of this tree, terminated by `;`.
    ///
    /// See [newick::to_newick].
    pub fn to_newick(&self) -> String {
        newick::to_newick(self)
    }
}

impl FromStr for CompactTree {
    type Err = ParsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        newick::parse_str(s)
    }
}

// ============================================================================
// Queries (pub)
// ============================================================================
impl CompactTree {
    /// Returns the number of nodes in this tree.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.parents.len()
    }

    /// Alias of [num_nodes](Self::num_nodes).
    #[inline]
    pub fn node_count(&self) -> usize {
        self.num_nodes()
    }

    /// Returns the index of the root.
    ///
    /// Parsed trees always have their root at index `0`.
    #[inline]
    pub fn root(&self) -> NodeIndex {
        0
    }

    /// Returns all attributes of node `index` at once.
    ///
    /// # Errors
    /// Returns [TreeError::OutOfRange] if `index >= num_nodes()`.
    pub fn attributes(&self, index: NodeIndex) -> Result<NodeAttributes<'_>, TreeError> {
        self.check_index(index)?;
        Ok(NodeAttributes {
            index,
            label: &self.labels[index],
            edge_length: self.edge_lengths[index],
            parent: self.parents[index],
            children: &self.children[index],
        })
    }

    /// Returns [TreeError::OutOfRange] unless `index` is a node of this tree.
    pub fn check_index(&self, index: NodeIndex) -> Result<(), TreeError> {
        if index < self.num_nodes() {
            Ok(())
        } else {
            Err(TreeError::OutOfRange {
                index,
                num_nodes: self.num_nodes(),
            })
        }
    }

    /// Returns the label of node `index`, empty if unlabeled.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn label(&self, index: NodeIndex) -> &str {
        &self.labels[index]
    }

    /// Returns the length of the incoming edge of node `index`, `0.0` if
    /// none was given.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn edge_length(&self, index: NodeIndex) -> f64 {
        self.edge_lengths[index]
    }

    /// Returns whether node `index` had an edge length in the source, to
    /// tell an explicit `:0` from a missing length.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn has_edge_length(&self, index: NodeIndex) -> bool {
        self.edge_length_given[index]
    }

    /// Returns the parent of node `index`, [NULL_NODE] for the root.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.parents[index]
    }

    /// Returns the children of node `index` in order of appearance.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.children[index]
    }

    /// Returns whether node `index` has no children.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn is_leaf(&self, index: NodeIndex) -> bool {
        self.children[index].is_empty()
    }

    /// Returns whether node `index` is the root.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn is_root(&self, index: NodeIndex) -> bool {
        self.parents[index] == NULL_NODE
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.children.iter().filter(|c| c.is_empty()).count()
    }

    /// Returns the number of non-leaf nodes (including the root, unless it
    /// is the only node).
    pub fn num_internal(&self) -> usize {
        self.num_nodes() - self.num_leaves()
    }

    /// Whether any node carries a non-empty label.
    pub fn has_labels(&self) -> bool {
        self.has_labels
    }

    /// Whether any edge length was given in the source.
    pub fn has_edge_lengths(&self) -> bool {
        self.has_edge_lengths
    }

    /// Returns the sum of all edge lengths in the tree.
    pub fn total_branch_length(&self) -> f64 {
        self.edge_lengths.iter().sum()
    }

    /// Returns the number of edges between node `index` and the root.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn depth(&self, index: NodeIndex) -> usize {
        self.ancestors(index).count()
    }

    /// Returns the sum of edge lengths on the path from node `index` to the
    /// root. The root's own edge length is not included.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn distance_to_root(&self, index: NodeIndex) -> f64 {
        let mut distance = 0.0;
        let mut current = index;
        while !self.is_root(current) {
            distance += self.edge_lengths[current];
            current = self.parents[current];
        }
        distance
    }

    /// Returns the lowest common ancestor of nodes `a` and `b`.
    ///
    /// A node is its own ancestor, so `mrca(a, a) == a` and the MRCA of a
    /// node and one of its descendants is the node itself.
    ///
    /// # Panics
    /// Panics if `a` or `b` is out of bounds.
    pub fn mrca(&self, a: NodeIndex, b: NodeIndex) -> NodeIndex {
        self.climb_to_mrca(a, b, |_| {})
    }

    /// Walks from `a` and `b` up to their lowest common ancestor and
    /// returns it, calling `on_edge` with every node whose incoming edge
    /// lies on the path between `a` and `b`.
    pub(crate) fn climb_to_mrca(
        &self,
        a: NodeIndex,
        b: NodeIndex,
        mut on_edge: impl FnMut(NodeIndex),
    ) -> NodeIndex {
        let (mut a, mut b) = (a, b);
        let (mut depth_a, mut depth_b) = (self.depth(a), self.depth(b));

        // Lift the deeper node to the depth of the other one
        while depth_a > depth_b {
            on_edge(a);
            a = self.parents[a];
            depth_a -= 1;
        }
        while depth_b > depth_a {
            on_edge(b);
            b = self.parents[b];
            depth_b -= 1;
        }

        while a != b {
            on_edge(a);
            on_edge(b);
            a = self.parents[a];
            b = self.parents[b];
        }
        a
    }

    /// Returns the lowest index of a node labeled `label`, if any.
    pub fn find_label(&self, label: &str) -> Option<NodeIndex> {
        self.labels.iter().position(|l| l == label)
    }

    /// Returns an iterator over the proper ancestors of node `index`,
    /// starting with its parent and ending with the root.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let first = self.parents[index];
        std::iter::successors((first != NULL_NODE).then_some(first), move |&i| {
            let parent = self.parents[i];
            (parent != NULL_NODE).then_some(parent)
        })
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - All arrays have the same length and the tree is not empty
    /// - The root is the only node without a parent
    /// - All parent indices are in bounds and list the node exactly once
    ///   among their children
    /// - All child indices are in bounds and point back to the parent
    /// - Every node reaches the root (no cycles)
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let n = self.num_nodes();
        if n == 0
            || self.labels.len() != n
            || self.edge_lengths.len() != n
            || self.edge_length_given.len() != n
            || self.children.len() != n
        {
            return false;
        }

        if self.parents[self.root()] != NULL_NODE {
            return false;
        }

        for index in 0..n {
            // Children point back to this node
            for &child in &self.children[index] {
                if child >= n || self.parents[child] != index {
                    return false;
                }
            }

            if index == self.root() {
                continue;
            }

            // Non-root has a valid parent listing it exactly once
            let parent = self.parents[index];
            if parent >= n {
                return false;
            }
            let occurrences = self.children[parent].iter().filter(|&&c| c == index).count();
            if occurrences != 1 {
                return false;
            }
        }

        // Every node is reached from the root exactly once
        self.preorder().count() == n
    }
}
