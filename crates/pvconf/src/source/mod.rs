//! Positioned byte source: a refillable input buffer with bounded lookahead.
//!
//! The source owns a fixed-size buffer of `capacity` bytes and reads the
//! underlying stream into it on demand. `peek(offset)` may look up to
//! `capacity - 1` bytes past the cursor; when the requested byte is not yet
//! buffered, the unconsumed tail is shifted to the front of the buffer and the
//! free space after it is refilled. That shift is what keeps multi-byte
//! lookahead correct when a marker straddles two physical reads.
//!
//! Invariants
//! - `pos <= len <= capacity`.
//! - Bytes in `buf[pos..len]` are unconsumed input, in stream order.
//! - Once `eof` is set the reader is never called again; peeks past the
//!   buffered bytes return `None`.
//! - Once a read has failed every peek fails with the same error kind.
//! - `position` is the line and column of `buf[pos]`.

use std::io::{self, ErrorKind, Read};

use tracing::trace;

use crate::{options::MIN_BUFFER_CAPACITY, token::Position};

/// Default buffer size, in bytes.
const DEFAULT_CAPACITY: usize = 1024;

/// Buffered reader with bounded lookahead and line and column tracking.
pub struct ByteSource<R> {
    reader: R,
    buf: Box<[u8]>,
    pos: usize,
    len: usize,
    eof: bool,
    /// Kind of the read error that ended the stream, if any.
    failed: Option<ErrorKind>,
    position: Position,
}

impl<R> core::fmt::Debug for ByteSource<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ByteSource")
            .field("capacity", &self.buf.len())
            .field("pos", &self.pos)
            .field("len", &self.len)
            .field("eof", &self.eof)
            .field("failed", &self.failed)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl<R: Read> ByteSource<R> {
    /// Creates a source with the default 1024-byte buffer.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_CAPACITY)
    }

    /// Creates a source with a `capacity`-byte buffer (at least
    /// [`MIN_BUFFER_CAPACITY`]).
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        let capacity = capacity.max(MIN_BUFFER_CAPACITY);
        Self {
            reader,
            buf: vec![0; capacity].into_boxed_slice(),
            pos: 0,
            len: 0,
            eof: false,
            failed: None,
            position: Position::START,
        }
    }

    /// Returns the byte `offset` positions past the cursor without consuming
    /// it, or `None` if the stream ends first.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not smaller than the buffer capacity.
    ///
    /// # Errors
    ///
    /// Returns the reader's error if a refill fails. Every later call fails
    /// with an error of the same kind without reading again.
    #[inline]
    pub fn peek(&mut self, offset: usize) -> io::Result<Option<u8>> {
        assert!(
            offset < self.buf.len(),
            "lookahead of {offset} bytes needs a buffer larger than {}",
            self.buf.len()
        );
        if let Some(kind) = self.failed {
            return Err(io::Error::new(kind, "config input already failed"));
        }
        if self.pos + offset >= self.len && !self.eof {
            self.refill(offset)?;
        }
        Ok(self.buf[self.pos..self.len].get(offset).copied())
    }

    /// Consumes and returns the byte at the cursor, updating the position.
    /// Returns `None` without moving at end of stream.
    ///
    /// # Errors
    ///
    /// See [`peek`](Self::peek).
    #[inline]
    pub fn consume(&mut self) -> io::Result<Option<u8>> {
        let Some(byte) = self.peek(0)? else {
            return Ok(None);
        };
        self.pos += 1;
        self.position.advance(byte);
        Ok(Some(byte))
    }

    /// Whether the next bytes equal `marker`. Consumes nothing.
    ///
    /// # Errors
    ///
    /// See [`peek`](Self::peek).
    pub fn matches(&mut self, marker: &[u8]) -> io::Result<bool> {
        for (offset, &expected) in marker.iter().enumerate() {
            if self.peek(offset)? != Some(expected) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Consumes `n` bytes, stopping early at end of stream.
    ///
    /// # Errors
    ///
    /// See [`peek`](Self::peek).
    pub fn skip(&mut self, n: usize) -> io::Result<()> {
        for _ in 0..n {
            if self.consume()?.is_none() {
                break;
            }
        }
        Ok(())
    }

    /// Moves the unconsumed bytes to the front of the buffer and reads until
    /// `buf[offset]` is available or the stream ends.
    fn refill(&mut self, offset: usize) -> io::Result<()> {
        if self.pos > 0 {
            self.buf.copy_within(self.pos..self.len, 0);
            self.len -= self.pos;
            self.pos = 0;
        }

        while self.len <= offset {
            match self.reader.read(&mut self.buf[self.len..]) {
                Ok(0) => {
                    trace!(buffered = self.len, "input exhausted");
                    self.eof = true;
                    break;
                }
                Ok(n) => {
                    trace!(read = n, buffered = self.len + n, "refilled input buffer");
                    self.len += n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    trace!(error = %e, "read failed");
                    self.eof = true;
                    self.failed = Some(e.kind());
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

impl<R> ByteSource<R> {
    /// Line and column of the next unconsumed byte.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Size of the buffer in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes read from the stream but not yet consumed.
    pub fn buffered(&self) -> usize {
        self.len - self.pos
    }

    /// Releases the reader. Buffered bytes are discarded.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
