use std::fs::File;
use std::path::Path;

use crate::stream::{IoReader, IoWriter};
use crate::{Error, Reader, Writer};

/// Reads directly from a file, wrap into [BufferedReader](crate::BufferedReader) when decoding
/// many small values.
pub struct FileReader {
    inner: IoReader<File>,
}

impl FileReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(FileReader {
            inner: IoReader::new(file),
        })
    }

    pub fn file(&self) -> &File {
        self.inner.get_ref()
    }
}

impl Reader for FileReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        self.inner.read(buf)
    }

    fn skip(&mut self, len: usize) -> Result<usize, Error> {
        self.inner.skip(len)
    }
}

/// Writes directly to a file, creating or truncating it.
pub struct FileWriter {
    inner: IoWriter<File>,
}

impl FileWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::create(path)?;
        Ok(FileWriter {
            inner: IoWriter::new(file),
        })
    }

    pub fn file(&self) -> &File {
        self.inner.get_ref()
    }
}

impl Writer for FileWriter {
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferedReader;
    use tempdir::TempDir;

    #[test]
    fn missing_file() {
        let dir = TempDir::new("leb_wrap").unwrap();
        let rd = FileReader::open(dir.path().join("missing.bin"));
        assert!(matches!(rd, Err(Error::Io(_))));
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new("leb_wrap").unwrap();
        let path = dir.path().join("values.bin");

        let mut wr = FileWriter::create(&path).unwrap();
        wr.write_u64(u64::MAX).unwrap();
        wr.write_wide_str("Ωmega").unwrap();
        wr.put(&vec![1i16, -1]).unwrap();
        wr.flush().unwrap();
        assert_eq!(wr.file().metadata().unwrap().len(), 10 + 1 + 6 + 3);
        drop(wr);

        let rd = FileReader::open(&path).unwrap();
        let mut rd = BufferedReader::with_capacity(rd, 4).unwrap();
        assert_eq!(rd.read_u64().unwrap(), u64::MAX);
        assert_eq!(rd.read_wide_string().unwrap(), "Ωmega");
        assert_eq!(rd.read_value::<Vec<i16>>().unwrap(), vec![1, -1]);
        assert_eq!(rd.read_byte().unwrap(), None);
    }
}
