use alloc_crate::vec::Vec;

use crate::{Error, Reader, Writer};

/// Reader over a borrowed byte slice that keeps track of its position.
///
/// Skipping is O(1), the position is never moved past the end of the slice.
pub struct SliceReader<'i> {
    buf: &'i [u8],
    pos: usize,
}

impl<'i> SliceReader<'i> {
    pub fn new(buf: &'i [u8]) -> Self {
        SliceReader { buf, pos: 0 }
    }

    /// Start reading at `offset`, fails if it is past the end of the slice.
    pub fn with_offset(buf: &'i [u8], offset: usize) -> Result<Self, Error> {
        if offset > buf.len() {
            return Err(Error::InvalidArgument("offset is past the end of the slice"));
        }
        Ok(SliceReader { buf, pos: offset })
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> &'i [u8] {
        &self.buf[self.pos..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    pub fn into_inner(self) -> &'i [u8] {
        self.buf
    }
}

impl Reader for SliceReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let n = buf.len().min(self.buf.len() - self.pos);
        buf[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn skip(&mut self, len: usize) -> Result<usize, Error> {
        let n = len.min(self.buf.len() - self.pos);
        self.pos += n;
        Ok(n)
    }
}

/// Reading from a slice advances it past the consumed bytes.
impl Reader for &[u8] {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let n = buf.len().min(self.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        Ok(n)
    }

    fn skip(&mut self, len: usize) -> Result<usize, Error> {
        let n = len.min(self.len());
        *self = &self[n..];
        Ok(n)
    }
}

impl Writer for Vec<u8> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.extend_from_slice(buf);
        Ok(())
    }
}
