//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse Newick format strings
//! into [CompactTree]s, and [to_newick] to write them back.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_str`] - parses a single string
//! * [`parse_file`] - parses the first tree of a file
//! * [`parse_file_all`] - parses all trees of a file
//!
//! # Full API
//! For more control, configure a [NewickParser] and
//! provide data via a [ByteParser]:
//! * [`NewickParser::parse_tree`] - parse a single tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= node ';'`
//! * `node ::= ['(' node (',' node)* ')'] [label] [':' number]`
//!
//! Furthermore:
//! * Labels are unquoted (no whitespace or `()[],:;`) or single quoted,
//!   with `''` standing for a quote inside a quoted label
//! * Numbers may be integers, decimals, or in scientific notation
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a number
//! * Comments are square brackets and can occur anywhere whitespace can

mod defs;
pub mod parser;
pub mod writer;

pub use parser::NewickParser;
pub use writer::{to_newick, write_newick_file};

use crate::model::CompactTree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string to obtain a [CompactTree].
///
/// Anything after the terminating `;` is ignored.
///
/// # Example
/// ```
/// use compact_tree::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<CompactTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_tree(&mut byte_parser)
}

/// Parses the first Newick tree of the file at `path`.
///
/// The file is read into memory in one go.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [CompactTree] - The first tree of the file
/// * [ParsingError] - If file reading fails or Newick format is invalid
///
/// # Example
/// ```no_run
/// use compact_tree::newick::parse_file;
///
/// let tree = parse_file("anseriformes.nwk")?;
/// println!("Parsed tree with {} nodes", tree.num_nodes());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<CompactTree, ParsingError> {
    let mut byte_parser = ByteParser::from_file(path)?;
    NewickParser::new().parse_tree(&mut byte_parser)
}

/// Parses all Newick trees of the file at `path`, streaming it through a
/// buffered reader.
///
/// Trees are separated by their semicolons; whitespace and `[...]`
/// comments between them are fine.
pub fn parse_file_all<P: AsRef<Path>>(path: P) -> Result<Vec<CompactTree>, ParsingError> {
    let byte_parser = ByteParser::from_file_buffered(path)?;
    NewickParser::new().parse_all(byte_parser)
}
