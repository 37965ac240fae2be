use alloc_crate::vec::Vec;

use crate::{Error, Reader, Writer};

/// Type that can be written into a [Writer].
///
/// The order of writes done in `encode` is the wire contract, [Decode] must read in the same order.
pub trait Encode {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error>;

    fn to_leb_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }
}

/// Type that can be constructed from a [Reader].
///
/// Stream carries no type information, the caller must request exactly the types that were written.
pub trait Decode: Sized {
    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error>;

    /// Decode from the beginning of `bytes`, anything left after the value is ignored.
    fn from_leb_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut rd = bytes;
        Self::decode(&mut rd)
    }
}

macro_rules! impl_scalar {
    ($($ty:ident),*) => {
        paste::paste! {
            $(
                impl Encode for $ty {
                    #[inline]
                    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
                        wr.[<write_ $ty>](*self)
                    }
                }

                impl Decode for $ty {
                    #[inline]
                    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
                        rd.[<read_ $ty>]()
                    }
                }
            )*
        }
    };
}
// fixed width
impl_scalar!(bool, u8, i8, f32, f64);
// unsigned LEB128
impl_scalar!(u16, u32, u64, usize, char);
// zigzag + LEB128
impl_scalar!(i16, i32, i64, isize);

impl Encode for str {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        wr.write_str(self)
    }
}

impl<T: Encode> Encode for [T] {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        wr.write_len(self.len())?;
        for item in self {
            item.encode(wr)?;
        }
        Ok(())
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        (**self).encode(wr)
    }
}

impl<T: Encode + ?Sized> Encode for &mut T {
    #[inline]
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        (**self).encode(wr)
    }
}

/// Array length is known on both sides, no length is written.
impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        for item in self {
            item.encode(wr)?;
        }
        Ok(())
    }
}

/// Elements are collected into a `Vec` first, stable Rust has no fallible array initialization
/// that drops the already decoded elements on error. Exactly `N` elements are pushed, so the
/// final cast only fails if that invariant is broken.
impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::decode(rd)?);
        }
        items
            .try_into()
            .map_err(|_| Error::InternalVecToArrayCast)
    }
}

impl Encode for () {
    fn encode<W: Writer + ?Sized>(&self, _wr: &mut W) -> Result<(), Error> {
        Ok(())
    }
}

impl Decode for () {
    fn decode<R: Reader + ?Sized>(_rd: &mut R) -> Result<Self, Error> {
        Ok(())
    }
}

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            #[allow(non_snake_case)]
            fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
                let ($($name,)+) = self;
                $($name.encode(wr)?;)+
                Ok(())
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
                Ok(($($name::decode(rd)?,)+))
            }
        }
    };
}
impl_tuple!(A);
impl_tuple!(A, B);
impl_tuple!(A, B, C);
impl_tuple!(A, B, C, D);
impl_tuple!(A, B, C, D, E);
impl_tuple!(A, B, C, D, E, F);
impl_tuple!(A, B, C, D, E, F, G);
impl_tuple!(A, B, C, D, E, F, G, H);
