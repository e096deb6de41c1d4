//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which offers methods
//! to parse a single tree or all trees of a source into [CompactTree]s.

use crate::model::{CompactTree, NodeIndex};
use crate::newick::defs::{DEFAULT_NUM_NODES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use log::{debug, trace};

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for Newick format phylogenetic trees of any arity.
///
/// # Construction & Configuration
/// * [`new()`](Self::new) / [`default()`](Self::default) - store labels
///   and edge lengths, keep labels verbatim
/// * [`with_capacity(num_nodes)`](Self::with_capacity)
///     - Expected number of nodes per tree, for pre-allocation. Otherwise
///       the size of the previously parsed tree is used as guess.
/// * [`with_labels(bool)`](Self::with_labels)
///     - Whether to store labels; when off, labels are still validated
///       but every node is left unlabeled.
/// * [`with_edge_lengths(bool)`](Self::with_edge_lengths)
///     - Whether to store edge lengths; when off, they are validated but
///       stored as `0.0`.
/// * [`with_underscores_as_spaces(bool)`](Self::with_underscores_as_spaces)
///     - Whether `_` in unquoted labels is read as a space.
///
/// # Parsing
/// * [`parse_tree`](Self::parse_tree) - Parse single tree
/// * [`parse_all`](Self::parse_all) - Parse all trees eagerly
///
/// # Example
/// ```
/// use compact_tree::newick::NewickParser;
/// use compact_tree::parser::ByteParser;
///
/// let input = "((A_meleagrides:1.0,A_vulturinum:1.0):0.5,(N_meleagris:1.0,G_plumifera:1.0):0.5);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let mut newick_parser = NewickParser::new().with_underscores_as_spaces(true);
///
/// let tree = newick_parser.parse_tree(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_nodes(), 7);
/// assert_eq!(tree.label(2), "A meleagrides");
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    know_capacity: bool,
    capacity: usize,
    store_labels: bool,
    store_edge_lengths: bool,
    underscores_as_spaces: bool,
}

/// Node still open during parsing, i.e. one whose closing token has not
/// been read yet.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    index: NodeIndex,
    has_label: bool,
    has_edge_length: bool,
    /// Children list closed by `)`
    sealed: bool,
}

impl OpenNode {
    fn new(index: NodeIndex) -> Self {
        Self {
            index,
            has_label: false,
            has_edge_length: false,
            sealed: false,
        }
    }

    fn accepts_children(&self) -> bool {
        !self.sealed && !self.has_label && !self.has_edge_length
    }
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings:
    /// - Number of nodes unknown (guessed from previous tree)
    /// - Labels and edge lengths are stored
    /// - Labels are kept verbatim
    pub fn new() -> Self {
        Self {
            know_capacity: false,
            capacity: DEFAULT_NUM_NODES_GUESS,
            store_labels: true,
            store_edge_lengths: true,
            underscores_as_spaces: false,
        }
    }

    /// Sets the expected number of nodes in each parsed tree.
    ///
    /// This allows pre-allocation of the tree arrays.
    pub fn with_capacity(mut self, num_nodes: usize) -> Self {
        self.capacity = num_nodes;
        self.know_capacity = true;
        self
    }

    /// Configures whether labels are stored.
    pub fn with_labels(mut self, store_labels: bool) -> Self {
        self.store_labels = store_labels;
        self
    }

    /// Configures whether edge lengths are stored.
    pub fn with_edge_lengths(mut self, store_edge_lengths: bool) -> Self {
        self.store_edge_lengths = store_edge_lengths;
        self
    }

    /// Configures whether underscores in unquoted labels become spaces.
    pub fn with_underscores_as_spaces(mut self, underscores_as_spaces: bool) -> Self {
        self.underscores_as_spaces = underscores_as_spaces;
        self
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Arguments
    /// * `byte_parser` - A byte parser with underlying source containing only
    ///   Newick strings, except for whitespace and `[...]` comments.
    ///
    /// # Returns
    /// * `Ok(Vec<CompactTree>)` - All parsed trees
    /// * `Err(ParsingError)` - If any tree fails to parse, or reading the
    ///   source fails (kind `IoError`); trees parsed before are dropped
    pub fn parse_all<B: ByteSource>(
        &mut self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<CompactTree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            byte_parser.skip_comment_and_whitespace()?;
            if byte_parser.is_eof() {
                byte_parser.check_source()?;
                break;
            }
            trees.push(self.parse_tree(&mut byte_parser)?);
            trace!("Parsed tree #{} ending at byte {}", trees.len(), byte_parser.position());
        }
        Ok(trees)
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// The parser is left right after the terminating `;`.
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(CompactTree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick string is invalid; no tree is
    ///   returned in that case
    pub fn parse_tree<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<CompactTree, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        let start = parser.position();

        let mut tree = CompactTree::with_root(self.capacity);
        let mut current = OpenNode::new(tree.root());
        // Open ancestors of `current`, innermost on top
        let mut ancestors: Vec<OpenNode> = Vec::new();

        loop {
            parser.skip_comment_and_whitespace()?;
            let Some(byte) = parser.peek() else {
                return Err(ParsingError::unexpected_eof(parser));
            };

            match byte {
                b'(' => {
                    if !current.accepts_children() {
                        return Err(ParsingError::invalid_newick_string(
                            parser,
                            "Unexpected '(' after label, edge length or children".to_string(),
                        ));
                    }
                    parser.next_byte();
                    let child = tree.add_child(current.index);
                    ancestors.push(current);
                    current = OpenNode::new(child);
                }
                b',' => {
                    let Some(parent) = ancestors.last() else {
                        return Err(ParsingError::invalid_newick_string(
                            parser,
                            "Unexpected ',' outside of parentheses".to_string(),
                        ));
                    };
                    parser.next_byte();
                    current = OpenNode::new(tree.add_child(parent.index));
                }
                b')' => {
                    let Some(parent) = ancestors.pop() else {
                        return Err(ParsingError::unbalanced_parentheses(
                            parser,
                            "')' without matching '('".to_string(),
                        ));
                    };
                    parser.next_byte();
                    current = parent;
                    current.sealed = true;
                }
                b':' => {
                    if current.has_edge_length {
                        return Err(ParsingError::invalid_newick_string(
                            parser,
                            "Node has more than one edge length".to_string(),
                        ));
                    }
                    parser.next_byte();
                    let edge_length = self.parse_edge_length(parser)?;
                    if self.store_edge_lengths {
                        tree.set_edge_length(current.index, edge_length);
                    }
                    current.has_edge_length = true;
                }
                b';' => {
                    if !ancestors.is_empty() {
                        return Err(ParsingError::unbalanced_parentheses(
                            parser,
                            format!("{} '(' not closed before ';'", ancestors.len()),
                        ));
                    }
                    parser.next_byte();
                    break;
                }
                b']' => {
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        "Unexpected ']' outside of comment".to_string(),
                    ));
                }
                _ => {
                    if current.has_label || current.has_edge_length {
                        return Err(ParsingError::invalid_newick_string(
                            parser,
                            "Unexpected label after label or edge length".to_string(),
                        ));
                    }
                    let quoted = byte == b'\'';
                    let mut label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
                    if self.store_labels {
                        if self.underscores_as_spaces && !quoted {
                            label = label.replace('_', " ");
                        }
                        tree.set_label(current.index, label);
                    }
                    current.has_label = true;
                }
            }
        }

        tree.shrink_to_fit();

        // Having parsed a full tree, use its size as guess for the next one
        if !self.know_capacity {
            self.capacity = tree.num_nodes();
        }

        debug!(
            "Parsed Newick tree with {} nodes ({} leaves) from {} bytes",
            tree.num_nodes(),
            tree.num_leaves(),
            parser.position() - start
        );

        Ok(tree)
    }
}

// ============================================================================
// Parsing helpers
// ============================================================================
impl NewickParser {
    /// Parses the number after `:`:
    /// - Skips comments/whitespace before the number
    /// - Supports integers and scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(edge_length)` if the number could be parsed
    /// - [ParsingError] if it is missing, malformed, or not finite
    ///   (e.g. `1e400` overflowing to infinity)
    fn parse_edge_length<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<f64, ParsingError> {
        parser.skip_comment_and_whitespace()?;

        let token = parser.parse_number_token();
        match token.parse::<f64>() {
            Ok(edge_length) if edge_length.is_finite() => Ok(edge_length),
            _ => Err(ParsingError::invalid_edge_length(parser, token)),
        }
    }
}
