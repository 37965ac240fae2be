use alloc_crate::boxed::Box;

use crate::varint::{
    ULeb128, zigzag_encode_i16, zigzag_encode_i32, zigzag_encode_i64, zigzag_encode_isize,
};
use crate::{Encode, Error};

macro_rules! write_varint_as {
    ($($ty:ident),*) => {
        paste::paste! {
            $(
                #[doc = "Write " $ty " as unsigned LEB128 number."]
                fn [<write_ $ty>](&mut self, val: $ty) -> Result<(), Error> {
                    self.write_varint(val as u64)
                }
            )*
        }
    };
}

macro_rules! write_zigzag_as {
    ($($ty:ident),*) => {
        paste::paste! {
            $(
                #[doc = "Write " $ty " as zigzag mapped LEB128 number."]
                fn [<write_ $ty>](&mut self, val: $ty) -> Result<(), Error> {
                    self.write_varint([<zigzag_encode_ $ty>](val) as u64)
                }
            )*
        }
    };
}

/// Sink of bytes.
///
/// [write](Writer::write) either writes all the bytes or fails, partial writes are never reported.
/// Backends that can be interrupted half-way must retry internally or return an error.
pub trait Writer {
    fn write(&mut self, buf: &[u8]) -> Result<(), Error>;

    /// Push any internally buffered bytes to the underlying sink.
    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn write_u8(&mut self, val: u8) -> Result<(), Error> {
        self.write(&[val])
    }

    fn write_i8(&mut self, val: i8) -> Result<(), Error> {
        self.write(&[val as u8])
    }

    /// Write bool as one byte, 0 or 1.
    fn write_bool(&mut self, val: bool) -> Result<(), Error> {
        self.write(&[val as u8])
    }

    /// Write f32 in Little Endian.
    fn write_f32(&mut self, val: f32) -> Result<(), Error> {
        self.write(&val.to_bits().to_le_bytes())
    }

    /// Write f64 in Little Endian.
    fn write_f64(&mut self, val: f64) -> Result<(), Error> {
        self.write(&val.to_bits().to_le_bytes())
    }

    /// Write unsigned LEB128 number, taking from 1 to 10 bytes.
    fn write_varint(&mut self, val: u64) -> Result<(), Error> {
        ULeb128(val).write(self)
    }

    /// Write zigzag mapped LEB128 number.
    fn write_signed_varint(&mut self, val: i64) -> Result<(), Error> {
        self.write_varint(zigzag_encode_i64(val))
    }

    write_varint_as!(u16, u32, u64, usize);
    write_zigzag_as!(i16, i32, i64, isize);

    /// Write a wide character as unsigned LEB128 code point.
    fn write_char(&mut self, val: char) -> Result<(), Error> {
        self.write_varint(val as u64)
    }

    /// Write element count of a sequence, string, set or map.
    fn write_len(&mut self, len: usize) -> Result<(), Error> {
        self.write_varint(len as u64)
    }

    /// Write count prefixed byte string.
    fn write_bytes(&mut self, val: &[u8]) -> Result<(), Error> {
        self.write_len(val.len())?;
        self.write(val)
    }

    /// Write count prefixed UTF-8 string, count is in bytes.
    fn write_str(&mut self, val: &str) -> Result<(), Error> {
        self.write_bytes(val.as_bytes())
    }

    /// Write a string as a sequence of wide characters: char count, followed by every char as
    /// LEB128 code point.
    fn write_wide_str(&mut self, val: &str) -> Result<(), Error> {
        self.write_len(val.chars().count())?;
        for ch in val.chars() {
            self.write_char(ch)?;
        }
        Ok(())
    }

    /// Write any value that implements [Encode].
    fn put<T: Encode + ?Sized>(&mut self, val: &T) -> Result<(), Error>
    where
        Self: Sized,
    {
        val.encode(self)
    }
}

impl<W: Writer + ?Sized> Writer for &mut W {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        (**self).write(buf)
    }

    #[inline]
    fn flush(&mut self) -> Result<(), Error> {
        (**self).flush()
    }
}

impl<W: Writer + ?Sized> Writer for Box<W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        (**self).write(buf)
    }

    #[inline]
    fn flush(&mut self) -> Result<(), Error> {
        (**self).flush()
    }
}
