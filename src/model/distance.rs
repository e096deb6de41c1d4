//! Path distances within a [CompactTree] and distances between trees.
//!
//! * [pairwise_distance](CompactTree::pairwise_distance) and
//!   [pairwise_edges](CompactTree::pairwise_edges) for two nodes
//! * [distance_matrix](CompactTree::distance_matrix) for all pairs of nodes
//! * [robinson_foulds](CompactTree::robinson_foulds) for two trees on the
//!   same leaf labels

use crate::model::tree::{CompactTree, NULL_NODE, NodeIndex, TreeError};
use std::collections::{HashMap, HashSet};

/// Leaf set of a subtree, one bit per leaf label.
type Cluster = Vec<u64>;

impl CompactTree {
    /// Returns the length of the path between nodes `a` and `b`, i.e. the
    /// sum of the edge lengths from both nodes up to their
    /// [mrca](Self::mrca). Missing edge lengths count as `0.0`.
    ///
    /// # Panics
    /// Panics if `a` or `b` is out of bounds.
    ///
    /// # Example
    /// ```
    /// use compact_tree::CompactTree;
    ///
    /// let tree: CompactTree = "((A:1,B:2)D:3,C:4)E;".parse().unwrap();
    /// let (a, c) = (tree.find_label("A").unwrap(), tree.find_label("C").unwrap());
    /// assert_eq!(tree.pairwise_distance(a, c), 8.0);
    /// ```
    pub fn pairwise_distance(&self, a: NodeIndex, b: NodeIndex) -> f64 {
        let mut distance = 0.0;
        self.climb_to_mrca(a, b, |index| distance += self.edge_length(index));
        distance
    }

    /// Returns the number of edges on the path between nodes `a` and `b`.
    ///
    /// # Panics
    /// Panics if `a` or `b` is out of bounds.
    pub fn pairwise_edges(&self, a: NodeIndex, b: NodeIndex) -> usize {
        let mut edges = 0;
        self.climb_to_mrca(a, b, |_| edges += 1);
        edges
    }

    /// Returns the path lengths between all pairs of nodes, with
    /// `matrix[a][b] == pairwise_distance(a, b)`.
    ///
    /// Each row is filled by one walk over the tree, so this takes time and
    /// memory quadratic in the number of nodes.
    pub fn distance_matrix(&self) -> Vec<Vec<f64>> {
        let n = self.num_nodes();
        let mut matrix = vec![vec![0.0; n]; n];
        // (node, neighbor it was reached from)
        let mut stack: Vec<(NodeIndex, NodeIndex)> = Vec::new();

        for (source, row) in matrix.iter_mut().enumerate() {
            stack.push((source, NULL_NODE));
            while let Some((index, from)) = stack.pop() {
                let parent = self.parent(index);
                if parent != NULL_NODE && parent != from {
                    row[parent] = row[index] + self.edge_length(index);
                    stack.push((parent, index));
                }
                for &child in self.children(index) {
                    if child != from {
                        row[child] = row[index] + self.edge_length(child);
                        stack.push((child, index));
                    }
                }
            }
        }
        matrix
    }

    /// Returns the rooted Robinson-Foulds distance to `other`: the number of
    /// clusters (leaf label sets below an inner node) found in exactly one
    /// of the two trees.
    ///
    /// Clusters of a single leaf and of all leaves are present in every
    /// tree and not counted. Inner node labels and edge lengths are ignored.
    ///
    /// # Errors
    /// * [TreeError::AmbiguousLeafLabel] if a leaf of either tree is
    ///   unlabeled or shares its label with another leaf
    /// * [TreeError::LeafSetMismatch] if the trees differ in leaf labels
    ///
    /// # Example
    /// ```
    /// use compact_tree::CompactTree;
    ///
    /// let t1: CompactTree = "((A,B),(C,D));".parse().unwrap();
    /// let t2: CompactTree = "((A,C),(B,D));".parse().unwrap();
    /// assert_eq!(t1.robinson_foulds(&t2).unwrap(), 4);
    /// assert_eq!(t1.robinson_foulds(&t1).unwrap(), 0);
    /// ```
    pub fn robinson_foulds(&self, other: &CompactTree) -> Result<usize, TreeError> {
        let taxa = self.leaf_taxa()?;
        let other_taxa = other.leaf_taxa()?;
        if taxa.len() != other_taxa.len() || other_taxa.keys().any(|l| !taxa.contains_key(l)) {
            return Err(TreeError::LeafSetMismatch);
        }

        let ours = self.clusters(&taxa);
        let theirs = other.clusters(&taxa);
        Ok(ours.symmetric_difference(&theirs).count())
    }

    /// Numbers the leaf labels of this tree in leaf index order.
    fn leaf_taxa(&self) -> Result<HashMap<&str, usize>, TreeError> {
        let mut taxa = HashMap::new();
        for leaf in self.leaves() {
            let label = self.label(leaf);
            if label.is_empty() || taxa.insert(label, taxa.len()).is_some() {
                return Err(TreeError::AmbiguousLeafLabel(label.to_string()));
            }
        }
        Ok(taxa)
    }

    /// Collects the non-trivial clusters of this tree, with leaves numbered
    /// by `taxa`. Every leaf label must be a key of `taxa`.
    fn clusters(&self, taxa: &HashMap<&str, usize>) -> HashSet<Cluster> {
        let num_taxa = taxa.len();
        let words = num_taxa.div_ceil(64);
        let mut below: Vec<Cluster> = vec![Vec::new(); self.num_nodes()];
        let mut clusters = HashSet::new();

        for index in self.postorder() {
            let mut cluster = vec![0u64; words];
            if self.is_leaf(index) {
                let taxon = taxa[self.label(index)];
                cluster[taxon / 64] |= 1u64 << (taxon % 64);
            } else {
                for &child in self.children(index) {
                    let child_cluster = std::mem::take(&mut below[child]);
                    for (word, child_word) in cluster.iter_mut().zip(child_cluster) {
                        *word |= child_word;
                    }
                }
                let size: usize = cluster.iter().map(|w| w.count_ones() as usize).sum();
                if size > 1 && size < num_taxa {
                    clusters.insert(cluster.clone());
                }
            }
            below[index] = cluster;
        }
        clusters
    }
}
