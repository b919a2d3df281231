// Axel '0vercl0k' Souchet - October 18 2026
//! This module implements the byte source that every parse and every memory
//! read goes through. A [`Source`] is either a file opened from a path or a
//! slice the user got from somewhere else, and a [`Cursor`] layers the
//! decoding primitives on top of it (cf [`Cursor::read_exact`] /
//! [`Cursor::scoped`]).
use std::io::{self, Read, Seek, SeekFrom};
use std::{convert, fs, path};

use crate::error::{Error, Result};

/// The underlying bytes of a dump: either a buffered file handle or a
/// regular slice.
#[derive(Debug)]
pub enum Source<'a> {
    /// A file opened from a path. The handle is owned by the instance, so two
    /// [`Source`]s opened on the same path never share a file position.
    File(io::BufReader<fs::File>),
    /// This gives users flexibility when they don't want to go through the
    /// file system and already have the dump in memory (a [`Vec<u8>`], a
    /// mapping they made themselves, etc.).
    Slice(io::Cursor<&'a [u8]>),
}

impl<'a> Source<'a> {
    /// Open the file at `path` and build a [`Source`] over it.
    pub fn open<P>(path: P) -> io::Result<Source<'a>>
    where
        P: convert::AsRef<path::Path>,
    {
        let file = fs::File::open(path)?;

        Ok(Self::File(io::BufReader::new(file)))
    }
}

/// Build a [`Source`] from a byte slice that isn't owned by the instance.
impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Slice(io::Cursor::new(value))
    }
}

impl<'a> Read for Source<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(file) => file.read(buf),
            Self::Slice(slice) => slice.read(buf),
        }
    }
}

impl<'a> Seek for Source<'a> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Self::File(file) => file.seek(pos),
            Self::Slice(slice) => slice.seek(pos),
        }
    }
}

/// A seekable reader over a [`Source`]. All multi-byte integers in the format
/// are little-endian, and a read that can't be fully satisfied is an error:
/// nothing is ever handed back half-populated.
#[derive(Debug)]
pub struct Cursor<'a> {
    source: Source<'a>,
}

impl<'a> Cursor<'a> {
    /// Create a [`Cursor`] positioned at the start of `source`.
    pub fn new(source: Source<'a>) -> Self {
        Self { source }
    }

    /// Get the current position.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.source.stream_position()?)
    }

    /// Move to the absolute offset `offset`.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        self.source.seek(SeekFrom::Start(offset))?;

        Ok(())
    }

    /// Move `count` bytes forward.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        let pos = self.position()?;

        // Landing past the end is fine, the next read reports it.
        self.seek(pos.saturating_add(count))
    }

    /// Read exactly `len` bytes. The buffer grows with what is actually read,
    /// so a bogus length coming from the file can't trigger a huge
    /// allocation.
    pub fn read_exact(&mut self, len: usize) -> Result<Vec<u8>> {
        let offset = self.position()?;
        let mut buf = Vec::new();
        self.source
            .by_ref()
            .take(len as u64)
            .read_to_end(&mut buf)?;

        if buf.len() < len {
            return Err(Error::ShortRead {
                offset,
                wanted: len,
            });
        }

        Ok(buf)
    }

    /// Run `f` and put the cursor back where it was, whether `f` succeeded or
    /// not. This is what allows peeking at out-of-line data (names, memory
    /// contents) without disturbing the caller.
    pub fn scoped<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let pos = self.position()?;
        let result = f(self);
        let restored = self.seek(pos);

        // The closure's error wins over a failed restore.
        let value = result?;
        restored?;

        Ok(value)
    }
}
