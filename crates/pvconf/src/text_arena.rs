use std::collections::TryReserveError;

use bstr::{BStr, ByteSlice};

use crate::token::TextRef;

/// Append-only byte store for token text, addressed by offset.
///
/// An entry is started with [`reserve`](Self::reserve), filled with
/// [`append`](Self::append) and closed with [`terminate`](Self::terminate),
/// which writes a nul byte and returns the entry's [`TextRef`]. Offsets stay
/// valid until the arena is [`truncate`](Self::truncate)d below them.
#[derive(Debug, Default, Clone)]
pub struct TextArena {
    data: Vec<u8>,
}

impl TextArena {
    /// Creates an empty arena without allocating.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Offset at which the next appended byte will be stored.
    #[inline]
    #[must_use]
    pub fn reserve(&self) -> usize {
        self.data.len()
    }

    /// Appends one byte, doubling the allocation when full.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the arena cannot grow.
    #[inline]
    pub fn append(&mut self, byte: u8) -> Result<(), TryReserveError> {
        if self.data.len() == self.data.capacity() {
            self.data.try_reserve(self.data.capacity().max(16))?;
        }
        self.data.push(byte);
        Ok(())
    }

    /// Nul-terminates the entry that started at `offset`.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub fn terminate(&mut self, offset: usize) -> Result<TextRef, TryReserveError> {
        debug_assert!(offset <= self.data.len());
        let len = self.data.len() - offset;
        self.append(0)?;
        Ok(TextRef { offset, len })
    }

    /// Bytes of a terminated entry, without the terminator.
    ///
    /// # Panics
    ///
    /// Panics if the entry has been truncated away.
    #[must_use]
    pub fn get(&self, text: TextRef) -> &BStr {
        self.data[text.offset..text.offset + text.len].as_bstr()
    }

    /// Bytes from `offset` up to the next nul byte (or the end of the arena).
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the arena.
    #[must_use]
    pub fn get_at(&self, offset: usize) -> &BStr {
        let tail = &self.data[offset..];
        let end = tail.find_byte(0).unwrap_or(tail.len());
        tail[..end].as_bstr()
    }

    /// Discards everything past `len`, invalidating offsets at or beyond it.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Bytes stored, terminators included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no bytes are stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
