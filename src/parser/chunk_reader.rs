//! Fixed-size chunked reads from the input log.
//!
//! All continuation state across chunk boundaries lives in the incremental
//! decoder, so the reader never needs to preserve previously-read bytes.

use std::io::{ErrorKind, Read};

/// Pulls the input into a caller-owned buffer in fixed-size chunks on demand
#[derive(Debug)]
pub struct ChunkReader<R> {
    inner: R,
    chunk_size: usize,
}

impl<R: Read> ChunkReader<R> {
    pub fn new(inner: R, chunk_size: usize) -> Self {
        Self { inner, chunk_size }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Read up to one chunk into `buf`, looping over short reads.
    ///
    /// Returns fewer bytes than the chunk size only at end-of-file;
    /// a return of 0 means the input is exhausted.
    pub fn read_next(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let want = self.chunk_size.min(buf.len());
        let mut filled = 0;
        while filled < want {
            match self.inner.read(&mut buf[filled..want]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that hands out at most one byte per read call
    struct TrickleReader<'a>(&'a [u8]);

    impl Read for TrickleReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_reads_in_chunks() {
        let mut reader = ChunkReader::new(Cursor::new(b"abcdefgh".to_vec()), 3);
        let mut buf = [0u8; 8];

        assert_eq!(reader.read_next(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"abc");
        assert_eq!(reader.read_next(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"def");
        assert_eq!(reader.read_next(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"gh");
        assert_eq!(reader.read_next(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_short_underlying_reads_still_fill_chunk() {
        let mut reader = ChunkReader::new(TrickleReader(b"abcdef"), 4);
        let mut buf = [0u8; 4];

        // One byte at a time underneath, but callers see full chunks
        assert_eq!(reader.read_next(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(reader.read_next(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
    }
}
