use alloc_crate::boxed::Box;
use alloc_crate::collections::{BTreeMap, BTreeSet, LinkedList, VecDeque};
use alloc_crate::string::String;
use alloc_crate::vec::Vec;

use crate::{Decode, Encode, Error, MAX_PREALLOC, Reader, Writer};

/// Decode `len` elements into the provided collection, element count is already consumed.
fn decode_into<R, T, C>(rd: &mut R, collection: &mut C, len: usize) -> Result<(), Error>
where
    R: Reader + ?Sized,
    T: Decode,
    C: Extend<T>,
{
    #[cfg(feature = "tracing-extended")]
    tracing::trace!("element count: {}", len);

    for _ in 0..len {
        let item = T::decode(rd)?;
        collection.extend(core::iter::once(item));
    }
    Ok(())
}

fn encode_seq<'a, W, T, I>(wr: &mut W, len: usize, items: I) -> Result<(), Error>
where
    W: Writer + ?Sized,
    T: Encode + 'a,
    I: IntoIterator<Item = &'a T>,
{
    wr.write_len(len)?;
    for item in items {
        item.encode(wr)?;
    }
    Ok(())
}

fn encode_map<'a, W, K, V, I>(wr: &mut W, len: usize, entries: I) -> Result<(), Error>
where
    W: Writer + ?Sized,
    K: Encode + 'a,
    V: Encode + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    wr.write_len(len)?;
    for (key, value) in entries {
        key.encode(wr)?;
        value.encode(wr)?;
    }
    Ok(())
}

impl Encode for String {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        wr.write_str(self.as_str())
    }
}

impl Decode for String {
    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
        rd.read_string()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        (**self).encode(wr)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
        Ok(Box::new(T::decode(rd)?))
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        self.as_slice().encode(wr)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
        let len = rd.read_len()?;
        let mut items = Vec::with_capacity(len.min(MAX_PREALLOC));
        decode_into(rd, &mut items, len)?;
        Ok(items)
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        encode_seq(wr, self.len(), self)
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
        let len = rd.read_len()?;
        let mut items = VecDeque::with_capacity(len.min(MAX_PREALLOC));
        decode_into(rd, &mut items, len)?;
        Ok(items)
    }
}

impl<T: Encode> Encode for LinkedList<T> {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        encode_seq(wr, self.len(), self)
    }
}

impl<T: Decode> Decode for LinkedList<T> {
    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
        let len = rd.read_len()?;
        let mut items = LinkedList::new();
        decode_into(rd, &mut items, len)?;
        Ok(items)
    }
}

impl<T: Encode> Encode for BTreeSet<T> {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        encode_seq(wr, self.len(), self)
    }
}

/// Duplicates on the wire collapse into one element.
impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
        let len = rd.read_len()?;
        let mut items = BTreeSet::new();
        decode_into(rd, &mut items, len)?;
        Ok(items)
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
        encode_map(wr, self.len(), self)
    }
}

/// Last value wins when a key is repeated on the wire.
impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
        let len = rd.read_len()?;
        let mut map = BTreeMap::new();
        decode_into::<_, (K, V), _>(rd, &mut map, len)?;
        Ok(map)
    }
}

#[cfg(feature = "std")]
mod hashed {
    use core::hash::{BuildHasher, Hash};
    use std::collections::{HashMap, HashSet};

    use super::{decode_into, encode_map, encode_seq};
    use crate::{Decode, Encode, Error, MAX_PREALLOC, Reader, Writer};

    impl<T: Encode, S> Encode for HashSet<T, S> {
        fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
            encode_seq(wr, self.len(), self)
        }
    }

    impl<T, S> Decode for HashSet<T, S>
    where
        T: Decode + Eq + Hash,
        S: BuildHasher + Default,
    {
        fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
            let len = rd.read_len()?;
            let mut items = HashSet::with_capacity_and_hasher(len.min(MAX_PREALLOC), S::default());
            decode_into(rd, &mut items, len)?;
            Ok(items)
        }
    }

    impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
        fn encode<W: Writer + ?Sized>(&self, wr: &mut W) -> Result<(), Error> {
            encode_map(wr, self.len(), self)
        }
    }

    impl<K, V, S> Decode for HashMap<K, V, S>
    where
        K: Decode + Eq + Hash,
        V: Decode,
        S: BuildHasher + Default,
    {
        fn decode<R: Reader + ?Sized>(rd: &mut R) -> Result<Self, Error> {
            let len = rd.read_len()?;
            let mut map = HashMap::with_capacity_and_hasher(len.min(MAX_PREALLOC), S::default());
            decode_into::<_, (K, V), _>(rd, &mut map, len)?;
            Ok(map)
        }
    }
}
