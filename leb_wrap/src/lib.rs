#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc as alloc_crate;

pub mod buf_reader;
pub mod collections;
pub mod memory;
pub mod reader;
pub mod traits;
pub mod varint;
pub mod writer;

#[cfg(feature = "std")]
pub mod file;
#[cfg(feature = "std")]
pub mod stream;

pub use buf_reader::BufferedReader;
pub use memory::SliceReader;
pub use reader::Reader;
pub use traits::{Decode, Encode};
pub use varint::ULeb128;
pub use writer::Writer;

#[cfg(feature = "std")]
pub use file::{FileReader, FileWriter};
#[cfg(feature = "std")]
pub use stream::{IoReader, IoWriter};

#[cfg(feature = "derive")]
pub use leb_wrap_derive::LebWrap;

/// Upper bound on the number of elements reserved up front when decoding a container.
/// Containers longer than this grow as elements are actually read, so a corrupt count
/// cannot allocate more than the stream backs up.
pub const MAX_PREALLOC: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("end of stream reached before all requested bytes were read")]
    EndOfStream,
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("variable length integer is longer than {} groups", varint::MAX_VARINT_LEN)]
    MalformedVarint,
    #[error("string is not valid UTF-8")]
    MalformedUtf8,
    #[error("byte {0:#04x} is not a valid bool")]
    InvalidBool(u8),
    #[error("{0:#x} is not a valid char")]
    InvalidChar(u32),
    #[error("unknown enum discriminant {0}")]
    UnknownDiscriminant(u8),
    #[error("length {0} does not fit into usize")]
    LengthOverflow(u64),
    #[error("decoded element count does not match array length")]
    InternalVecToArrayCast,
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True if the error was caused by the stream running out of data.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream)
    }
}

pub mod prelude {
    pub use crate::Error as LebWrapError;
    pub use crate::buf_reader::BufferedReader;
    pub use crate::memory::SliceReader;
    pub use crate::reader::Reader;
    pub use crate::traits::{Decode, Encode};
    pub use crate::varint::ULeb128;
    pub use crate::writer::Writer;

    #[cfg(feature = "std")]
    pub use crate::file::{FileReader, FileWriter};
    #[cfg(feature = "std")]
    pub use crate::stream::{IoReader, IoWriter};

    #[cfg(feature = "derive")]
    pub use leb_wrap_derive::LebWrap;
}
