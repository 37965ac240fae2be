use std::io::{self, ErrorKind};

use crate::{Error, Reader, Writer};

/// Adapter from [std::io::Read] to [Reader].
///
/// Reads are retried until the buffer is full or the stream returns 0, so a short result always
/// means the stream is exhausted.
pub struct IoReader<R> {
    inner: R,
}

impl<R: io::Read> IoReader<R> {
    pub fn new(inner: R) -> Self {
        IoReader { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> Reader for IoReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut filled = 0;
        while filled < buf.len() {
            match io::Read::read(&mut self.inner, &mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    fn skip(&mut self, len: usize) -> Result<usize, Error> {
        let mut limited = io::Read::take(&mut self.inner, len as u64);
        let skipped = io::copy(&mut limited, &mut io::sink())?;
        Ok(skipped as usize)
    }
}

/// Adapter from [std::io::Write] to [Writer].
pub struct IoWriter<W> {
    inner: W,
}

impl<W: io::Write> IoWriter<W> {
    pub fn new(inner: W) -> Self {
        IoWriter { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Writer for IoWriter<W> {
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        io::Write::write_all(&mut self.inner, buf)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        io::Write::flush(&mut self.inner)?;
        Ok(())
    }
}
