//! Byte source abstractions for parsing.
//!
//! This module provides the [ByteSource] trait, implemented by
//! [InMemoryByteSource](crate::parser::in_memory_byte_source::InMemoryByteSource)
//! and [BufferedByteSource](crate::parser::buffered_byte_source::BufferedByteSource).

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// Trait defining the interface for different byte sources used by
/// [ByteParser](crate::parser::ByteParser).
///
/// This trait abstracts over different ways of accessing byte data:
/// - Owned in-memory bytes (strings or whole files read upfront)
/// - Buffered reading from files (`BufReader<File>`)
///
/// The Newick parser only ever moves forward, so sources need not support
/// seeking.
pub trait ByteSource {
    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn peek(&mut self) -> Option<u8>;

    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns up to `k` bytes from the current position for error context,
    /// without consuming them.
    fn get_context(&mut self, k: usize) -> Vec<u8>;

    /// Returns the number of bytes consumed so far.
    fn position(&self) -> usize;

    /// Check if at end of data.
    fn is_eof(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Takes the read error that ended the data early, if any.
    ///
    /// A failed read looks like EOF to [peek](Self::peek) and
    /// [next_byte](Self::next_byte); callers hitting EOF check this to
    /// tell the two apart. Sources that can not fail keep the default.
    fn take_error(&mut self) -> Option<std::io::Error> {
        None
    }
}
