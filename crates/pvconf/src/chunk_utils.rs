use std::io::{self, Read};

/// Split `payload` into approximately equal-sized chunks.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// A reader that hands out its input in fixed physical reads.
///
/// Every call to [`read`](Read::read) returns bytes from at most one chunk,
/// so the chunk boundaries are exactly the boundaries a consumer observes.
/// Empty chunks are skipped; they would otherwise look like end of stream.
#[derive(Debug, Clone)]
pub struct ChunkedReader<'a> {
    chunks: Vec<&'a [u8]>,
    current: usize,
    offset: usize,
    reads: usize,
}

impl<'a> ChunkedReader<'a> {
    /// Serves `chunks` in order, one per read call.
    #[must_use]
    pub fn new(chunks: Vec<&'a [u8]>) -> Self {
        Self {
            chunks,
            current: 0,
            offset: 0,
            reads: 0,
        }
    }

    /// Serves `payload` in reads of at most `chunk_size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    #[must_use]
    pub fn with_chunk_size(payload: &'a [u8], chunk_size: usize) -> Self {
        assert!(chunk_size > 0);
        Self::new(payload.chunks(chunk_size).collect())
    }

    /// Number of `read` calls served so far, including the final empty one.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        while let Some(chunk) = self.chunks.get(self.current) {
            let rest = &chunk[self.offset..];
            if rest.is_empty() {
                self.current += 1;
                self.offset = 0;
                continue;
            }
            let n = rest.len().min(buf.len());
            buf[..n].copy_from_slice(&rest[..n]);
            self.offset += n;
            return Ok(n);
        }
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produce_chunks_example() {
        let chunks = produce_chunks(b"a{{{b}}}", 3);
        assert_eq!(chunks, vec![&b"a{{"[..], &b"{b}"[..], &b"}}"[..]]);
        assert_eq!(produce_chunks(b"", 3), Vec::<&[u8]>::new());
    }

    #[test]
    fn chunked_reader_respects_chunk_boundaries() {
        let mut reader = ChunkedReader::new(vec![&b"ab"[..], &b""[..], &b"cde"[..]]);
        let mut buf = [0u8; 8];
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ab");
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"cde");
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
        assert_eq!(reader.reads(), 3);
    }

    #[test]
    fn chunked_reader_splits_chunks_larger_than_the_buffer() {
        let mut reader = ChunkedReader::with_chunk_size(b"abcdef", 6);
        let mut buf = [0u8; 4];
        assert_eq!(reader.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }
}
