//! Contraction of a [CompactTree] onto a subset of its nodes.

use crate::model::tree::{CompactTree, NULL_NODE, NodeIndex, TreeError};

impl CompactTree {
    /// Returns the tree induced by `nodes`, e.g. the subtree spanned by a
    /// set of leaves.
    ///
    /// The result keeps every listed node, plus every node where the paths
    /// between listed nodes branch. Its root is the [mrca](Self::mrca) of
    /// all listed nodes. Other nodes are dropped: those without listed
    /// descendants entirely, those on a path between kept nodes by merging
    /// their edge into the edge below, whose length becomes the sum of the
    /// merged lengths.
    ///
    /// Kept nodes keep their labels and the order of their children. The
    /// new root has no edge length. Nodes of the new tree are indexed in
    /// preorder. Duplicates in `nodes` are ignored.
    ///
    /// # Errors
    /// * [TreeError::EmptyNodeSet] if `nodes` is empty
    /// * [TreeError::OutOfRange] if any index is not a node of this tree
    ///
    /// # Example
    /// ```
    /// use compact_tree::CompactTree;
    ///
    /// let tree: CompactTree = "(((A:1,B:1)X:1,C:2)Y:1,D:5)Z;".parse().unwrap();
    /// let keep = ["A", "C", "D"].map(|l| tree.find_label(l).unwrap());
    /// let contracted = tree.contract_tree(&keep).unwrap();
    /// assert_eq!(contracted.to_newick(), "((A:2,C:2)Y:1,D:5)Z;");
    /// ```
    pub fn contract_tree(&self, nodes: &[NodeIndex]) -> Result<CompactTree, TreeError> {
        let Some((&first, rest)) = nodes.split_first() else {
            return Err(TreeError::EmptyNodeSet);
        };

        let n = self.num_nodes();
        let mut listed = vec![false; n];
        for &index in nodes {
            self.check_index(index)?;
            listed[index] = true;
        }
        let new_root = rest.iter().fold(first, |mrca, &index| self.mrca(mrca, index));

        // Whether the subtree of a node holds a listed node, and for how
        // many of its children that is the case
        let mut marked = listed.clone();
        let mut marked_children = vec![0usize; n];
        for index in self.postorder() {
            let parent = self.parent(index);
            if marked[index] && parent != NULL_NODE {
                marked[parent] = true;
                marked_children[parent] += 1;
            }
        }

        let mut tree = CompactTree::with_root(2 * nodes.len());
        let root = tree.root();
        tree.set_label(root, self.label(new_root).to_string());

        // (node, parent in new tree, length of merged edges, any length given)
        let mut stack: Vec<(NodeIndex, NodeIndex, f64, bool)> = self
            .children(new_root)
            .iter()
            .rev()
            .filter(|&&child| marked[child])
            .map(|&child| (child, root, 0.0, false))
            .collect();

        while let Some((index, parent, length, given)) = stack.pop() {
            let length = length + self.edge_length(index);
            let given = given || self.has_edge_length(index);

            let below = if listed[index] || marked_children[index] >= 2 {
                let new_index = tree.add_child(parent);
                tree.set_label(new_index, self.label(index).to_string());
                if given {
                    tree.set_edge_length(new_index, length);
                }
                (new_index, 0.0, false)
            } else {
                (parent, length, given)
            };

            stack.extend(
                self.children(index)
                    .iter()
                    .rev()
                    .filter(|&&child| marked[child])
                    .map(|&child| (child, below.0, below.1, below.2)),
            );
        }

        tree.shrink_to_fit();
        Ok(tree)
    }
}
