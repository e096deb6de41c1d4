//! Random binary trees, e.g. as benchmark and test input.
//!
//! Both generators grow a tree one leaf at a time by splitting an edge and
//! label the leaves `"0"`, `"1"`, ... in order of insertion. Inner nodes are
//! unlabeled and no edge lengths are set. Randomness comes from any
//! [rand::Rng], so seeded generators give reproducible trees.

use crate::model::tree::{CompactTree, NULL_NODE, NodeIndex};
use rand::Rng;

impl CompactTree {
    /// Returns a random binary tree with `num_leaves` leaves (at least one)
    /// grown by the Yule process: each step picks a leaf uniformly at random
    /// and splits it into two.
    ///
    /// # Example
    /// ```
    /// use compact_tree::CompactTree;
    ///
    /// let tree = CompactTree::yule(10, &mut rand::thread_rng());
    /// assert_eq!(tree.num_leaves(), 10);
    /// assert_eq!(tree.num_nodes(), 19);
    /// ```
    pub fn yule(num_leaves: usize, rng: &mut impl Rng) -> CompactTree {
        let mut growth = Growth::new();
        for _ in 1..num_leaves {
            let leaf = growth.leaves[rng.gen_range(0..growth.leaves.len())];
            growth.split_edge_above(leaf);
        }
        growth.into_tree()
    }

    /// Returns a binary tree with `num_leaves` leaves (at least one), drawn
    /// uniformly from all rooted binary trees on these labeled leaves.
    ///
    /// Each step picks any node uniformly at random, the root included, and
    /// inserts the new leaf on the edge above it.
    pub fn uniform(num_leaves: usize, rng: &mut impl Rng) -> CompactTree {
        let mut growth = Growth::new();
        for _ in 1..num_leaves {
            let node = rng.gen_range(0..growth.parents.len());
            growth.split_edge_above(node);
        }
        growth.into_tree()
    }
}

/// Binary tree under construction. Splitting edges moves nodes around, so
/// nodes are renumbered in preorder once growing is done.
struct Growth {
    parents: Vec<NodeIndex>,
    children: Vec<Vec<NodeIndex>>,
    /// Number of each leaf in order of insertion, `None` for inner nodes
    taxa: Vec<Option<usize>>,
    leaves: Vec<NodeIndex>,
    root: NodeIndex,
}

impl Growth {
    /// Starts with a single leaf `"0"` as root.
    fn new() -> Self {
        Growth {
            parents: vec![NULL_NODE],
            children: vec![Vec::new()],
            taxa: vec![Some(0)],
            leaves: vec![0],
            root: 0,
        }
    }

    fn push_node(&mut self, parent: NodeIndex, taxon: Option<usize>) -> NodeIndex {
        let index = self.parents.len();
        self.parents.push(parent);
        self.children.push(Vec::new());
        self.taxa.push(taxon);
        index
    }

    /// Inserts a new inner node on the edge above `node`, with `node` as its
    /// first and a new leaf as its second child.
    fn split_edge_above(&mut self, node: NodeIndex) {
        let parent = self.parents[node];
        let split = self.push_node(parent, None);
        if parent == NULL_NODE {
            self.root = split;
        } else if let Some(slot) = self.children[parent].iter_mut().find(|c| **c == node) {
            *slot = split;
        }
        self.parents[node] = split;

        let leaf = self.push_node(split, Some(self.leaves.len()));
        self.children[split] = vec![node, leaf];
        self.leaves.push(leaf);
    }

    fn into_tree(self) -> CompactTree {
        let mut tree = CompactTree::with_root(self.parents.len());
        let root = tree.root();
        if let Some(taxon) = self.taxa[self.root] {
            tree.set_label(root, taxon.to_string());
        }

        // (node, parent in new tree)
        let mut stack: Vec<(NodeIndex, NodeIndex)> =
            self.children[self.root].iter().rev().map(|&c| (c, root)).collect();
        while let Some((node, parent)) = stack.pop() {
            let index = tree.add_child(parent);
            if let Some(taxon) = self.taxa[node] {
                tree.set_label(index, taxon.to_string());
            }
            stack.extend(self.children[node].iter().rev().map(|&c| (c, index)));
        }
        tree
    }
}
