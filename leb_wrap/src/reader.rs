use alloc_crate::boxed::Box;
use alloc_crate::string::String;
use alloc_crate::vec::Vec;

use crate::varint::{
    ULeb128, zigzag_decode_i16, zigzag_decode_i32, zigzag_decode_i64, zigzag_decode_isize,
};
use crate::{Decode, Error, MAX_PREALLOC};

const SKIP_CHUNK: usize = 256;

macro_rules! read_varint_as {
    ($($ty:ident),*) => {
        paste::paste! {
            $(
                #[doc = "Read an unsigned LEB128 number and truncate it to " $ty "."]
                fn [<read_ $ty>](&mut self) -> Result<$ty, Error> {
                    Ok(self.read_varint()? as $ty)
                }
            )*
        }
    };
}

macro_rules! read_zigzag_as {
    ($($ty:ident => $unsigned:ident),*) => {
        paste::paste! {
            $(
                #[doc = "Read an unsigned LEB128 number, truncate it to " $unsigned " and undo zigzag mapping."]
                fn [<read_ $ty>](&mut self) -> Result<$ty, Error> {
                    Ok([<zigzag_decode_ $ty>](self.read_varint()? as $unsigned))
                }
            )*
        }
    };
}

/// Forward-only source of bytes.
///
/// Only [read](Reader::read) must be implemented, all the typed helpers are built on top of it.
/// A result shorter than requested means the source is exhausted, it is not an error by itself.
/// Use [read_fully](Reader::read_fully) or any of the typed helpers to turn a short read into
/// [Error::EndOfStream].
pub trait Reader {
    /// Read up to `buf.len()` bytes, returning the number of bytes actually read.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;

    /// Skip up to `len` bytes, returning the number of bytes actually skipped.
    ///
    /// Default implementation reads into a small scratch buffer, override when the source can do better.
    fn skip(&mut self, len: usize) -> Result<usize, Error> {
        let mut scratch = [0u8; SKIP_CHUNK];
        let mut skipped = 0;
        while skipped < len {
            let chunk = (len - skipped).min(SKIP_CHUNK);
            let n = self.read(&mut scratch[..chunk])?;
            skipped += n;
            if n < chunk {
                break;
            }
        }
        Ok(skipped)
    }

    /// Fill the whole buffer or fail with [Error::EndOfStream].
    fn read_fully(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        if self.read(buf)? != buf.len() {
            return Err(Error::EndOfStream);
        }
        Ok(())
    }

    fn read_u8(&mut self) -> Result<u8, Error> {
        let mut byte = [0u8; 1];
        self.read_fully(&mut byte)?;
        Ok(byte[0])
    }

    fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_u8()? as i8)
    }

    /// Read one byte, only 0 and 1 are accepted.
    fn read_bool(&mut self) -> Result<bool, Error> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::InvalidBool(other)),
        }
    }

    /// Read f32 in Little Endian, NaN payloads are preserved.
    fn read_f32(&mut self) -> Result<f32, Error> {
        let mut bytes = [0u8; 4];
        self.read_fully(&mut bytes)?;
        Ok(f32::from_bits(u32::from_le_bytes(bytes)))
    }

    /// Read f64 in Little Endian, NaN payloads are preserved.
    fn read_f64(&mut self) -> Result<f64, Error> {
        let mut bytes = [0u8; 8];
        self.read_fully(&mut bytes)?;
        Ok(f64::from_bits(u64::from_le_bytes(bytes)))
    }

    /// Read unsigned LEB128 number.
    fn read_varint(&mut self) -> Result<u64, Error> {
        Ok(ULeb128::read(self)?.0)
    }

    /// Read zigzag mapped LEB128 number.
    fn read_signed_varint(&mut self) -> Result<i64, Error> {
        Ok(zigzag_decode_i64(self.read_varint()?))
    }

    read_varint_as!(u16, u32, u64, usize);
    read_zigzag_as!(i16 => u16, i32 => u32, i64 => u64, isize => usize);

    /// Read a wide character, encoded as unsigned LEB128 code point.
    fn read_char(&mut self) -> Result<char, Error> {
        let code = self.read_varint()? as u32;
        char::from_u32(code).ok_or(Error::InvalidChar(code))
    }

    /// Read element count of a sequence, string, set or map.
    fn read_len(&mut self) -> Result<usize, Error> {
        let len = self.read_varint()?;
        usize::try_from(len).map_err(|_| Error::LengthOverflow(len))
    }

    /// Read count prefixed byte string.
    fn read_bytes(&mut self) -> Result<Vec<u8>, Error> {
        let len = self.read_len()?;
        read_exact_vec(self, len)
    }

    /// Read count prefixed UTF-8 string.
    fn read_string(&mut self) -> Result<String, Error> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|_| Error::MalformedUtf8)
    }

    /// Read a string written with [write_wide_str](crate::Writer::write_wide_str):
    /// char count followed by each char as LEB128 code point.
    fn read_wide_string(&mut self) -> Result<String, Error> {
        let len = self.read_len()?;
        let mut string = String::with_capacity(len.min(MAX_PREALLOC));
        for _ in 0..len {
            string.push(self.read_char()?);
        }
        Ok(string)
    }

    /// Read any value that implements [Decode].
    fn read_value<T: Decode>(&mut self) -> Result<T, Error>
    where
        Self: Sized,
    {
        T::decode(self)
    }

    /// Decode a value of the same type as `expected` and compare the two.
    /// The value is consumed from the stream regardless of the outcome.
    fn decode_eq<T: Decode + PartialEq>(&mut self, expected: &T) -> Result<bool, Error>
    where
        Self: Sized,
    {
        Ok(T::decode(self)? == *expected)
    }
}

/// Read exactly `len` bytes, growing the buffer in [MAX_PREALLOC] steps.
pub(crate) fn read_exact_vec<R: Reader + ?Sized>(rd: &mut R, len: usize) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::with_capacity(len.min(MAX_PREALLOC));
    while bytes.len() < len {
        let start = bytes.len();
        let step = (len - start).min(MAX_PREALLOC);
        bytes.resize(start + step, 0);
        rd.read_fully(&mut bytes[start..])?;
    }
    Ok(bytes)
}

impl<R: Reader + ?Sized> Reader for &mut R {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        (**self).read(buf)
    }

    #[inline]
    fn skip(&mut self, len: usize) -> Result<usize, Error> {
        (**self).skip(len)
    }

    #[inline]
    fn read_fully(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        (**self).read_fully(buf)
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, Error> {
        (**self).read_u8()
    }
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        (**self).read(buf)
    }

    #[inline]
    fn skip(&mut self, len: usize) -> Result<usize, Error> {
        (**self).skip(len)
    }

    #[inline]
    fn read_fully(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        (**self).read_fully(buf)
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, Error> {
        (**self).read_u8()
    }
}
