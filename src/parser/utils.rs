//! Utility functions for label escaping in the Newick format.
//!
//! Labels containing whitespace or Newick punctuation must be written in
//! single quotes, with internal single quotes doubled, so that reading them
//! back yields the original label.

/// Characters that force a label to be quoted when written.
const SPECIAL_CHARS: &[char] = &[
    ' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\'',
];

/// Checks if a label can be written as is, i.e. without quotes.
///
/// # Examples
/// ```
/// # use compact_tree::parser::utils::is_plain_label;
/// assert!(is_plain_label("Pukeko")); // Also known as Australasian Swamphen
/// assert!(is_plain_label("Australasian_Swamphen"));
/// assert!(!is_plain_label("Australasian Swamphen"));
/// assert!(!is_plain_label("Pu[ke]ko"));
/// assert!(!is_plain_label("Baillon's_Crake"));
/// ```
pub fn is_plain_label(label: &str) -> bool {
    !label.contains(SPECIAL_CHARS)
}

/// Escapes a label for safe use in Newick strings.
///
/// Labels containing whitespace or special characters are wrapped in single
/// quotes and internal single quotes are doubled. Other labels are returned
/// unchanged.
///
/// # Examples
/// ```
/// # use compact_tree::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if is_plain_label(label) {
        return label.to_string();
    }

    let mut escaped = String::with_capacity(label.len() + 2);
    escaped.push('\'');
    escaped.push_str(&label.replace('\'', "''"));
    escaped.push('\'');
    escaped
}
