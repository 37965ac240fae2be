use alloc_crate::vec::Vec;

use crate::{Error, Reader};

/// Window size used by [BufferedReader::new].
pub const DEFAULT_CAPACITY: usize = 8192;

/// Amortizes small reads against an unbuffered source.
///
/// Window is filled on demand with exactly `capacity` bytes requested from the source, and is
/// discarded in full on every refill. A window shorter than `capacity` means the source reported
/// exhaustion on the last refill; the next refill asks the source again.
///
/// Each call to [read](Reader::read) or [skip](Reader::skip) refills at most once, requests that
/// do not fit into the window after draining it go directly to the source.
///
/// The source must not be read directly while it is wrapped, buffered bytes would be lost.
pub struct BufferedReader<R> {
    source: R,
    capacity: usize,
    window: Vec<u8>,
    pos: usize,
}

impl<R: Reader> BufferedReader<R> {
    pub fn new(source: R) -> Self {
        BufferedReader {
            source,
            capacity: DEFAULT_CAPACITY,
            window: Vec::with_capacity(DEFAULT_CAPACITY),
            pos: 0,
        }
    }

    pub fn with_capacity(source: R, capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::InvalidArgument("buffer capacity must be non-zero"));
        }
        Ok(BufferedReader {
            source,
            capacity,
            window: Vec::with_capacity(capacity),
            pos: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes already pulled from the source and not yet consumed.
    pub fn buffer(&self) -> &[u8] {
        &self.window[self.pos..]
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Unwrap the source, bytes still in the window are dropped.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Read one byte, `None` if the source has no more data.
    pub fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        if self.pos == self.window.len() {
            self.refill()?;
            if self.window.is_empty() {
                return Ok(None);
            }
        }
        let byte = self.window[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    fn available(&self) -> usize {
        self.window.len() - self.pos
    }

    fn refill(&mut self) -> Result<(), Error> {
        debug_assert_eq!(self.pos, self.window.len());
        self.pos = 0;
        self.window.resize(self.capacity, 0);
        match self.source.read(&mut self.window) {
            Ok(len) => {
                self.window.truncate(len);

                #[cfg(feature = "tracing-extended")]
                tracing::trace!("refill: {}/{} bytes", len, self.capacity);

                Ok(())
            }
            Err(e) => {
                self.window.clear();
                Err(e)
            }
        }
    }

    /// Take up to `len` bytes from a fresh window, returns how many were available.
    fn refill_and_take(&mut self, len: usize) -> Result<usize, Error> {
        self.refill()?;
        let taken = len.min(self.window.len());
        self.pos = taken;
        Ok(taken)
    }
}

impl<R: Reader> Reader for BufferedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let available = self.available();
        if available >= buf.len() {
            let len = buf.len();
            buf.copy_from_slice(&self.window[self.pos..self.pos + len]);
            self.pos += len;
            return Ok(len);
        }

        buf[..available].copy_from_slice(&self.window[self.pos..]);
        self.pos = self.window.len();
        let rest = &mut buf[available..];
        if rest.len() > self.capacity {
            #[cfg(feature = "tracing-extended")]
            tracing::trace!("bypass: {} bytes", rest.len());

            let len = self.source.read(rest)?;
            return Ok(available + len);
        }
        let taken = self.refill_and_take(rest.len())?;
        rest[..taken].copy_from_slice(&self.window[..taken]);
        Ok(available + taken)
    }

    fn skip(&mut self, len: usize) -> Result<usize, Error> {
        let available = self.available();
        if available >= len {
            self.pos += len;
            return Ok(len);
        }

        self.pos = self.window.len();
        let rest = len - available;
        if rest > self.capacity {
            let skipped = self.source.skip(rest)?;
            return Ok(available + skipped);
        }
        let taken = self.refill_and_take(rest)?;
        Ok(available + taken)
    }

    fn read_u8(&mut self) -> Result<u8, Error> {
        self.read_byte()?.ok_or(Error::EndOfStream)
    }
}
