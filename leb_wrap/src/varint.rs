use core::fmt::{Debug, Formatter};

use crate::{Decode, Encode, Error, Reader, Writer};

/// Maximum number of 7-bit groups a u64 can occupy.
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;

/// Unsigned LEB128 encoded u64.
/// Each byte carries 7 bits of the number, least significant group first, with bit 7 set on every
/// byte except the last one.
///
/// Writers always produce the shortest form, readers also accept trailing zero groups.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ULeb128(pub u64);

impl ULeb128 {
    pub fn len_bytes(&self) -> usize {
        if self.0 == 0 {
            1
        } else {
            ((64 - self.0.leading_zeros()) as usize).div_ceil(7)
        }
    }

    /// Encode into the provided scratch buffer and return the number of bytes used.
    pub fn encode_into(&self, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
        let mut val = self.0;
        let mut len = 0;
        while val >= CONTINUATION as u64 {
            buf[len] = (val as u8 & PAYLOAD) | CONTINUATION;
            val >>= 7;
            len += 1;
        }
        buf[len] = val as u8;
        len + 1
    }

    /// Write the number with a single call to [Writer::write].
    pub fn write<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        let mut buf = [0u8; MAX_VARINT_LEN];
        let len = self.encode_into(&mut buf);
        wr.write(&buf[..len])
    }

    /// Read one byte at a time until a byte without the continuation bit is found.
    ///
    /// Fails with [Error::MalformedVarint] if the 10th byte still has the continuation bit set.
    /// Payload bits above bit 63 in the 10th byte are ignored.
    pub fn read<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
        let mut num = 0u64;
        let mut shift = 0;
        for i in 0..MAX_VARINT_LEN {
            let byte = rd.read_u8()?;
            if i == MAX_VARINT_LEN - 1 && byte & CONTINUATION != 0 {
                return Err(Error::MalformedVarint);
            }
            num |= u64::from(byte & PAYLOAD) << shift;
            if byte & CONTINUATION == 0 {
                break;
            }
            shift += 7;
        }

        #[cfg(feature = "tracing-extended")]
        tracing::trace!("read_varint() = {}", num);

        Ok(ULeb128(num))
    }
}

impl Encode for ULeb128 {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        self.write(wr)
    }
}

impl Decode for ULeb128 {
    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
        ULeb128::read(rd)
    }
}

impl Debug for ULeb128 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ULeb128 {
    fn from(value: u64) -> Self {
        ULeb128(value)
    }
}

macro_rules! zigzag {
    ($($signed:ident => $unsigned:ident),*) => {
        paste::paste! {
            $(
                #[doc = "Map " $signed " onto " $unsigned " so that small magnitudes of either sign stay small."]
                #[inline]
                pub fn [<zigzag_encode_ $signed>](value: $signed) -> $unsigned {
                    ((value << 1) ^ (value >> (<$signed>::BITS - 1))) as $unsigned
                }

                #[doc = "Inverse of [zigzag_encode_" $signed "]."]
                #[inline]
                pub fn [<zigzag_decode_ $signed>](value: $unsigned) -> $signed {
                    ((value >> 1) as $signed) ^ -((value & 1) as $signed)
                }
            )*
        }
    };
}
zigzag!(i16 => u16, i32 => u32, i64 => u64, isize => usize);
