//! In-memory implementation of byte source for parsing.

use crate::parser::byte_source::ByteSource;
use std::fs;
use std::path::Path;

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================$=
/// An in-memory byte source that owns its data.
///
/// This is the most efficient byte source for Newick strings and for files
/// that fit entirely in memory.
pub struct InMemoryByteSource {
    /// The owned byte data being parsed
    input: Vec<u8>,
    /// Current position in the byte vector
    pos: usize,
}

impl InMemoryByteSource {
    /// Creates a new in-memory byte source from a Vec of bytes.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            input: bytes,
            pos: 0,
        }
    }

    /// Reads the entire file at `path` into memory.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::from_vec(fs::read(path)?))
    }

    /// Number of bytes in the source.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Whether the source holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn peek(&mut self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.input.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    fn get_context(&mut self, k: usize) -> Vec<u8> {
        let end = (self.pos + k).min(self.input.len());
        self.input[self.pos.min(end)..end].to_vec()
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn is_eof(&mut self) -> bool {
        self.pos >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_next() {
        let mut source = InMemoryByteSource::from_vec(b"(A);".to_vec());
        assert_eq!(source.peek(), Some(b'('));
        assert_eq!(source.next_byte(), Some(b'('));
        assert_eq!(source.position(), 1);
        assert_eq!(source.peek(), Some(b'A'));
    }

    #[test]
    fn test_eof() {
        let mut source = InMemoryByteSource::from_vec(b";".to_vec());
        assert!(!source.is_eof());
        source.next_byte();
        assert!(source.is_eof());
        assert_eq!(source.next_byte(), None);
        assert_eq!(source.position(), 1);
    }

    #[test]
    fn test_context_is_clamped() {
        let mut source = InMemoryByteSource::from_vec(b"(A,B);".to_vec());
        source.next_byte();
        assert_eq!(source.get_context(3), b"A,B".to_vec());
        assert_eq!(source.get_context(100), b"A,B);".to_vec());
        assert_eq!(source.position(), 1);
    }
}
