//! A bounds-checked cursor over a byte slice.
//!
//! This is the ergonomics layer every parser in this crate reads through.
//! It exists so that frame/header walking never touches a raw index: every
//! read either returns data or a [`StreamError`], and panics from an
//! out-of-bounds index are structurally impossible.

use std::error;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy)]
pub(crate) struct ByteReader<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, StreamError> {
        if self.is_empty() {
            return Err(StreamError::EndOfStream);
        }

        self.pos += 1;
        Ok(self.src[self.pos - 1])
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], StreamError> {
        if self.remaining() < N {
            return Err(StreamError::BufferUnderread {
                want: N,
                remaining: self.remaining(),
            });
        }

        let mut arr = [0u8; N];
        arr.copy_from_slice(&self.src[self.pos..self.pos + N]);
        self.pos += N;
        Ok(arr)
    }

    /// Consumes and returns a slice of length `n`.
    pub(crate) fn slice(&mut self, n: usize) -> Result<&'a [u8], StreamError> {
        if self.remaining() < n {
            return Err(StreamError::BufferUnderread {
                want: n,
                remaining: self.remaining(),
            });
        }

        let out = &self.src[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Looks at the next `n` bytes without consuming them.
    pub(crate) fn peek(&self, n: usize) -> Option<&'a [u8]> {
        if self.remaining() < n {
            return None;
        }

        Some(&self.src[self.pos..self.pos + n])
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), StreamError> {
        self.slice(n).map(|_| ())
    }

    /// Searches forward for `needle`, returning the data up to and including
    /// it (mirroring the teacher's `BufStream::search`). If `needle` is
    /// never found, returns everything remaining and exhausts the stream.
    pub(crate) fn search(&mut self, needle: &[u8]) -> &'a [u8] {
        let start = self.pos;
        let limit = self.src.len();

        let mut begin = self.pos;
        let mut end = self.pos + needle.len();

        while end <= limit {
            if &self.src[begin..end] == needle {
                self.pos = end;
                return &self.src[start..self.pos];
            }

            begin += needle.len();
            end += needle.len();
        }

        self.take_rest_from(start)
    }

    fn take_rest_from(&mut self, start: usize) -> &'a [u8] {
        self.pos = self.src.len();
        &self.src[start..self.pos]
    }

    pub(crate) fn take_rest(&mut self) -> &'a [u8] {
        let start = self.pos;
        self.take_rest_from(start)
    }

    pub(crate) fn len(&self) -> usize {
        self.src.len()
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.len() - self.pos
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

/// The error type returned when a [`ByteReader`] read fails.
#[derive(Debug, Clone, Copy)]
pub(crate) enum StreamError {
    EndOfStream,
    BufferUnderread { want: usize, remaining: usize },
}

impl Display for StreamError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            StreamError::EndOfStream => write!(f, "end of stream"),
            StreamError::BufferUnderread { want, remaining } => write!(
                f,
                "buffer underread: wanted {} bytes but {} remain",
                want, remaining
            ),
        }
    }
}

impl error::Error for StreamError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_array_and_u8() {
        let mut r = ByteReader::new(b"ID3\x04");
        assert_eq!(&r.read_array::<3>().unwrap(), b"ID3");
        assert_eq!(r.read_u8().unwrap(), 4);
        assert!(r.is_empty());
    }

    #[test]
    fn underread_errors() {
        let mut r = ByteReader::new(b"ab");
        assert!(r.read_array::<3>().is_err());
    }

    #[test]
    fn search_finds_terminator() {
        let mut r = ByteReader::new(b"hello\0world");
        assert_eq!(r.search(&[0]), b"hello\0");
        assert_eq!(r.take_rest(), b"world");
    }

    #[test]
    fn search_exhausts_on_miss() {
        let mut r = ByteReader::new(b"nozero");
        assert_eq!(r.search(&[0]), b"nozero");
        assert!(r.is_empty());
    }
}
