//! Buffered reader implementation of byte source for parsing.
//!
//! This module provides [BufferedByteSource], which wraps a file in a [BufReader]
//! for streaming I/O. Use this for large multi-tree files where loading
//! everything into memory would be impractical.

use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use crate::parser::byte_source::ByteSource;

// =#========================================================================#=
// BUFFERED BYTE SOURCE
// =#========================================================================$=
/// A buffered byte source for streaming large files.
///
/// Generic over the underlying reader, with [File] as default.
/// The first read error ends the data; it is kept until fetched with
/// [take_error](ByteSource::take_error).
pub struct BufferedByteSource<R: Read = File> {
    /// Underlying reader, handles getting chunks from file
    reader: BufReader<R>,

    /// Current absolute position in the stream
    pos: usize,

    /// Set by the first failed read; no further reads are attempted
    failed: bool,

    /// Error of the failed read, until taken
    error: Option<io::Error>,
}

impl BufferedByteSource<File> {
    /// Creates a new buffered byte source from a file path.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::from_reader(File::open(path)?))
    }
}

impl<R: Read> BufferedByteSource<R> {
    /// Wraps any reader in a buffered byte source.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            pos: 0,
            failed: false,
            error: None,
        }
    }
}

impl<R: Read> ByteSource for BufferedByteSource<R> {
    fn peek(&mut self) -> Option<u8> {
        if self.failed {
            return None;
        }
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return buf.first().copied(),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.failed = true;
                    self.error = Some(e);
                    return None;
                }
            }
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.reader.consume(1);
        self.pos += 1;
        Some(byte)
    }

    /// Only bytes already in the internal buffer are available as context.
    fn get_context(&mut self, k: usize) -> Vec<u8> {
        if self.peek().is_none() {
            return Vec::new();
        }
        match self.reader.fill_buf() {
            Ok(buf) => buf[..k.min(buf.len())].to_vec(),
            Err(_) => Vec::new(),
        }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}
