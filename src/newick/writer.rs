//! Newick string and file writing for [CompactTree].

use crate::model::{CompactTree, NodeIndex};
use crate::parser::utils::escape_label;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Rough number of characters per node, for the Newick string capacity
const CHARS_PER_NODE_GUESS: usize = 8;

/// Writes given list of trees to a file in Newick format, one tree per line.
///
/// # Errors
/// Returns an I/O error if writing fails.
///
/// # Example
/// ```no_run
/// use compact_tree::newick::write_newick_file;
/// use compact_tree::CompactTree;
/// use std::fs::File;
///
/// let tree: CompactTree = "(A:1,B:2)C;".parse()?;
/// write_newick_file(File::create("trees.nwk")?, &[tree])?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_newick_file(file: File, trees: &[CompactTree]) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    for tree in trees {
        writer.write_all(to_newick(tree).as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()
}

/// Returns the Newick representation of this tree with closing semicolon.
///
/// - Children are written in stored order.
/// - Labels are escaped (quoted) where necessary.
/// - Edge lengths are written exactly for the nodes that had one in the
///   source (see [CompactTree::has_edge_length]).
///
/// # Example
/// ```
/// use compact_tree::CompactTree;
/// use compact_tree::newick::to_newick;
///
/// let tree: CompactTree = "((A:1, 'B b':2)D:0.5, C:3.25) E;".parse().unwrap();
/// assert_eq!(to_newick(&tree), "((A:1,'B b':2)D:0.5,C:3.25)E;");
///
/// let tree: CompactTree = "(A,B)C:1;".parse().unwrap();
/// assert_eq!(to_newick(&tree), "(A,B)C:1;");
/// ```
pub fn to_newick(tree: &CompactTree) -> String {
    let mut newick = String::with_capacity(tree.num_nodes() * CHARS_PER_NODE_GUESS);

    // (node, next child to write)
    let mut frames: Vec<(NodeIndex, usize)> = vec![(tree.root(), 0)];
    while let Some(frame) = frames.last_mut() {
        let (index, next_child) = *frame;
        let children = tree.children(index);

        if next_child < children.len() {
            newick.push(if next_child == 0 { '(' } else { ',' });
            frame.1 += 1;
            frames.push((children[next_child], 0));
        } else {
            if !children.is_empty() {
                newick.push(')');
            }
            push_label_and_edge_length(tree, index, &mut newick);
            frames.pop();
        }
    }

    newick.push(';');
    newick
}

fn push_label_and_edge_length(tree: &CompactTree, index: NodeIndex, newick: &mut String) {
    let label = tree.label(index);
    if !label.is_empty() {
        newick.push_str(&escape_label(label));
    }

    if tree.has_edge_length(index) {
        newick.push(':');
        newick.push_str(&tree.edge_length(index).to_string());
    }
}
