// Axel '0vercl0k' Souchet - October 18 2026
//! This module implements the [`Reader`], which resolves virtual addresses of
//! the dumped process to bytes stored in the file.
use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

use crate::error::{Error, Result};
use crate::map::{Cursor, Source};
use crate::minidump::{MemorySegment, Minidump, Module};
use crate::structs::{Arch, LocationDescriptor32};

/// The customary maximum length handed to [`Reader::read_string`].
pub const DEFAULT_STRING_LENGTH: usize = 1024;

/// Answers questions about the address space of a parsed [`Minidump`].
///
/// A reader borrows the dump it was created from and owns its own handle on
/// the underlying bytes. Every read seeks, reads and then puts the handle back
/// where it was, so reads never leak cursor state into each other.
#[derive(Debug)]
pub struct Reader<'a> {
    dump: &'a Minidump,
    cursor: Cursor<'a>,
}

impl<'a> Reader<'a> {
    /// Create a reader over `dump`, reading memory contents off `source`.
    /// `source` is expected to hold the same bytes `dump` was parsed from.
    pub fn new(dump: &'a Minidump, source: Source<'a>) -> Self {
        Self {
            dump,
            cursor: Cursor::new(source),
        }
    }

    /// Get the [`Minidump`] this reader resolves addresses for.
    pub fn dump(&self) -> &'a Minidump {
        self.dump
    }

    /// Find the first segment that contains `address`. Segments can overlap,
    /// in which case the one that comes first in the dump wins.
    pub fn find_segment(&self, address: u64) -> Option<&'a MemorySegment> {
        self.dump
            .memory_segments()
            .iter()
            .find(|segment| segment.contains(address))
    }

    /// Read `len` bytes at `address`. The whole range needs to be captured by
    /// the segment containing `address`; a read that would spill into the
    /// next segment fails even if that segment is adjacent.
    pub fn read_memory(&mut self, address: u64, len: usize) -> Result<Vec<u8>> {
        let out_of_range = || Error::OutOfRange {
            address,
            len: len as u64,
        };

        let segment = self.find_segment(address).ok_or_else(out_of_range)?;
        if !segment.contains_range(address, len as u64) {
            trace!(address, len, start = segment.start, "read crosses the segment boundary");
            return Err(out_of_range());
        }

        // `address` is contained in the segment, so this can't underflow.
        let file_offset = segment
            .file_offset
            .checked_add(address - segment.start)
            .ok_or_else(out_of_range)?;

        self.read_at(file_offset, len)
    }

    /// Read a pointer-sized, little-endian integer at `address`. Returns
    /// [`None`] if the memory can't be read.
    pub fn read_pointer(&mut self, address: u64) -> Option<u64> {
        let bytes = self.read_memory(address, self.pointer_size()).ok()?;

        Some(LittleEndian::read_uint(&bytes, bytes.len()))
    }

    /// Read `max_len` bytes at `address` and return what comes before the
    /// first NUL byte. Every byte becomes the char of the same value, so
    /// nothing gets replaced or dropped.
    ///
    /// Unlike [`Reader::read_pointer`], failing to read the memory is not
    /// reported: an empty string comes back instead.
    pub fn read_string(&mut self, address: u64, max_len: usize) -> String {
        let Ok(mut bytes) = self.read_memory(address, max_len) else {
            return String::new();
        };

        if let Some(nul) = bytes.iter().position(|&b| b == 0) {
            bytes.truncate(nul);
        }

        bytes.into_iter().map(char::from).collect()
    }

    /// Read the raw bytes described by `location`, for example a thread
    /// context or a CodeView record.
    pub fn read_location(&mut self, location: LocationDescriptor32) -> Result<Vec<u8>> {
        self.read_at(location.rva.into(), location.data_size as usize)
    }

    /// Get the architecture of the dumped process, [`Arch::Unknown`] if the
    /// dump has no system info.
    pub fn arch(&self) -> Arch {
        self.dump.arch()
    }

    /// Was the dumped process 64-bit?
    pub fn is_64bit(&self) -> bool {
        self.arch().is_64bit()
    }

    /// Size of a pointer in the dumped process: 8 for 64-bit architectures,
    /// 4 for anything else (unknown included).
    pub fn pointer_size(&self) -> usize {
        if self.is_64bit() {
            8
        } else {
            4
        }
    }

    /// Find the first [`Module`] whose `[base, base + size)` contains
    /// `address`.
    pub fn find_module_by_address(&self, address: u64) -> Option<&'a Module> {
        self.dump.get_module(address)
    }

    /// Find the first [`Module`] whose name contains `name`.
    pub fn find_module_by_name(&self, name: &str) -> Option<&'a Module> {
        self.dump.modules().iter().find(|module| {
            module
                .name
                .as_deref()
                .is_some_and(|module_name| module_name.contains(name))
        })
    }

    /// Read `len` bytes at `file_offset` without disturbing the cursor.
    fn read_at(&mut self, file_offset: u64, len: usize) -> Result<Vec<u8>> {
        self.cursor.scoped(|cursor| {
            cursor.seek(file_offset)?;
            cursor.read_exact(len)
        })
    }
}
