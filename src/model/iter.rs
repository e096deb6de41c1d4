//! Traversal iterators over a [CompactTree].
//!
//! All iterators yield [NodeIndex] values and keep their own explicit
//! stack or queue, so traversal depth is bounded by heap memory rather than
//! the call stack. They only borrow the tree, hence any number of them can
//! walk the same tree independently.

use crate::model::tree::{CompactTree, NodeIndex};
use std::collections::VecDeque;
use std::iter::FusedIterator;

// =$========================================================================$=
// ITERATOR CONSTRUCTION
// =$========================================================================$=
impl CompactTree {
    /// Returns an iterator over the tree in preorder (parents before children).
    ///
    /// Same as [preorder_begin](Self::preorder_begin).
    ///
    /// # Example
    /// ```
    /// use compact_tree::CompactTree;
    ///
    /// let tree: CompactTree = "((A,B)D,C)E;".parse().unwrap();
    /// let labels: Vec<_> = tree.preorder().map(|i| tree.label(i)).collect();
    /// assert_eq!(labels, ["E", "D", "A", "B", "C"]);
    /// ```
    pub fn preorder(&self) -> PreorderIter<'_> {
        self.preorder_begin()
    }

    /// Returns a preorder position at the root.
    pub fn preorder_begin(&self) -> PreorderIter<'_> {
        PreorderIter {
            tree: self,
            current: (self.num_nodes() > 0).then_some(self.root()),
            stack: Vec::new(),
        }
    }

    /// Returns the end position of a preorder traversal of this tree.
    ///
    /// # Example
    /// ```
    /// use compact_tree::CompactTree;
    ///
    /// let tree: CompactTree = "(A:1,B:2)C;".parse().unwrap();
    /// let end = tree.preorder_end();
    /// let mut it = tree.preorder_begin();
    /// let mut visited = Vec::new();
    /// while it != end {
    ///     visited.push(it.get().unwrap());
    ///     it.advance();
    /// }
    /// assert_eq!(visited, [0, 1, 2]);
    /// ```
    pub fn preorder_end(&self) -> PreorderIter<'_> {
        PreorderIter {
            tree: self,
            current: None,
            stack: Vec::new(),
        }
    }

    /// Returns an iterator over the tree in postorder (children before parents).
    pub fn postorder(&self) -> PostorderIter<'_> {
        PostorderIter::new(self)
    }

    /// Returns an iterator over the tree level by level, starting at the root.
    pub fn levelorder(&self) -> LevelorderIter<'_> {
        LevelorderIter::new(self)
    }

    /// Returns an iterator over all leaves in increasing index order.
    pub fn leaves(&self) -> LeavesIter<'_> {
        LeavesIter {
            tree: self,
            next: 0,
        }
    }
}

// =$========================================================================$=
// PREORDER
// =$========================================================================$=
/// Position in a preorder traversal (a node before all of its descendants,
/// siblings in stored order).
///
/// A position is either at a node or at the end. Two positions compare
/// equal if they belong to the same tree and are at the same node, or are
/// both at the end, which allows the `begin`/`end` loop style:
/// `while it != tree.preorder_end() { ... it.advance(); }`.
///
/// It is also an [Iterator] yielding the node at the current position and
/// then advancing.
#[derive(Debug, Clone)]
pub struct PreorderIter<'a> {
    tree: &'a CompactTree,
    current: Option<NodeIndex>,
    // Nodes still to visit, next one on top
    stack: Vec<NodeIndex>,
}

impl PreorderIter<'_> {
    /// Returns the node at the current position, or `None` at the end.
    #[inline]
    pub fn get(&self) -> Option<NodeIndex> {
        self.current
    }

    /// Whether the traversal is exhausted.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next node in preorder, or to the end if the current node
    /// was the last one.
    ///
    /// # Panics
    /// Panics if the iterator is already at the end.
    pub fn advance(&mut self) {
        let Some(index) = self.current else {
            panic!("advanced a preorder iterator past its end");
        };

        // Push children in reverse, so the first child is on top
        self.stack.extend(self.tree.children(index).iter().rev());
        self.current = self.stack.pop();
    }
}

impl PartialEq for PreorderIter<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl Eq for PreorderIter<'_> {}

impl Iterator for PreorderIter<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        self.advance();
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.current {
            None => (0, Some(0)),
            Some(_) => (1 + self.stack.len(), Some(self.tree.num_nodes())),
        }
    }
}

impl FusedIterator for PreorderIter<'_> {}

// =$========================================================================$=
// POSTORDER
// =$========================================================================$=
/// Iterator for postorder traversal (children before parents).
///
/// Each node is visited after all its descendants, siblings in stored order.
#[derive(Debug, Clone)]
pub struct PostorderIter<'a> {
    tree: &'a CompactTree,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
}

impl<'a> PostorderIter<'a> {
    fn new(tree: &'a CompactTree) -> Self {
        let mut stack = Vec::new();
        if tree.num_nodes() > 0 {
            stack.push((tree.root(), false));
        }
        PostorderIter { tree, stack }
    }
}

impl Iterator for PostorderIter<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some((index, children_visited)) = self.stack.pop() {
            let children = tree.children(index);
            if children_visited || children.is_empty() {
                return Some(index);
            }

            self.stack.push((index, true));
            self.stack.extend(children.iter().rev().map(|&c| (c, false)));
        }
        None
    }
}

impl FusedIterator for PostorderIter<'_> {}

// =$========================================================================$=
// LEVELORDER
// =$========================================================================$=
/// Iterator for breadth-first traversal: the root, then all nodes at depth
/// one, and so on. Within a level nodes appear in left-to-right order.
#[derive(Debug, Clone)]
pub struct LevelorderIter<'a> {
    tree: &'a CompactTree,
    queue: VecDeque<NodeIndex>,
}

impl<'a> LevelorderIter<'a> {
    fn new(tree: &'a CompactTree) -> Self {
        let mut queue = VecDeque::new();
        if tree.num_nodes() > 0 {
            queue.push_back(tree.root());
        }
        LevelorderIter { tree, queue }
    }
}

impl Iterator for LevelorderIter<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.queue.pop_front()?;
        self.queue.extend(self.tree.children(index));
        Some(index)
    }
}

impl FusedIterator for LevelorderIter<'_> {}

// =$========================================================================$=
// LEAVES
// =$========================================================================$=
/// Iterator over the leaves of a tree in increasing index order.
#[derive(Debug, Clone)]
pub struct LeavesIter<'a> {
    tree: &'a CompactTree,
    next: NodeIndex,
}

impl Iterator for LeavesIter<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.tree.num_nodes() {
            let index = self.next;
            self.next += 1;
            if self.tree.is_leaf(index) {
                return Some(index);
            }
        }
        None
    }
}

impl FusedIterator for LeavesIter<'_> {}
