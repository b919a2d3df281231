// Axel '0vercl0k' Souchet - October 18 2026
//! Error types returned while parsing a dump or resolving addresses in it.
use std::io;

use thiserror::Error;

use crate::structs::StreamType;

/// Everything that can go wrong in this crate.
///
/// Parsing errors are structural: they abort [`crate::Minidump::parse`] and no
/// model is handed back. [`Error::OutOfRange`] is the only resolution error and
/// is scoped to the [`crate::Reader`] query that raised it.
#[derive(Error, Debug)]
pub enum Error {
    /// The byte source could not be opened, seeked or read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Fewer bytes were available than the record being decoded needs.
    #[error("short read: wanted {wanted} bytes at offset {offset:#x}")]
    ShortRead { offset: u64, wanted: usize },

    /// The header does not start with the `MDMP` magic.
    #[error("header signature {0:#x} is unexpected")]
    InvalidSignature(u32),

    /// The header declares zero streams.
    #[error("header declares no streams")]
    NoStreams,

    /// A list stream declares a per-entry size this crate doesn't know how to
    /// decode.
    #[error("entry size {found} doesn't match the expected {expected}")]
    EntrySizeMismatch { expected: u32, found: u32 },

    /// A stream type this crate decodes failed to decode.
    #[error("failed to decode the {kind:?} stream")]
    Stream {
        kind: StreamType,
        #[source]
        source: Box<Error>,
    },

    /// The requested span isn't entirely captured by a single memory segment.
    #[error("{len:#x} bytes at {address:#x} are not backed by a single memory segment")]
    OutOfRange { address: u64, len: u64 },
}

impl Error {
    /// Wrap `self` as the failure of the `kind` stream.
    pub(crate) fn in_stream(self, kind: StreamType) -> Self {
        Self::Stream {
            kind,
            source: Box::new(self),
        }
    }
}

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
