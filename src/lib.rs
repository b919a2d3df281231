// Axel '0vercl0k' Souchet - October 18 2026
#![doc = include_str!("../README.md")]
mod error;
pub use error::{Error, Result};

mod map;
pub use map::Source;

mod minidump;
pub use minidump::{
    Handle, MemoryRegion, MemorySegment, Minidump, Module, Thread, MAX_MEMORY_INFO_ENTRIES,
    MAX_MEMORY_RANGES, MAX_NAME_LENGTH, MEM_COMMIT, MEM_FREE, MEM_IMAGE, MEM_MAPPED, MEM_PRIVATE,
    MEM_RESERVE, PAGE_EXECUTE, PAGE_EXECUTE_READ, PAGE_EXECUTE_READWRITE, PAGE_EXECUTE_WRITECOPY,
    PAGE_GUARD, PAGE_NOACCESS, PAGE_NOCACHE, PAGE_READONLY, PAGE_READWRITE, PAGE_WRITECOMBINE,
    PAGE_WRITECOPY,
};

mod reader;
pub use reader::{Reader, DEFAULT_STRING_LENGTH};

mod structs;
pub use structs::{
    Arch, Directory, ExceptionRecord, ExceptionStream, FixedFileInfo, Header,
    LocationDescriptor32, MiscInfo, StreamType, SystemInfo, EXCEPTION_MAXIMUM_PARAMETERS,
    EXPECTED_DUMP_SIGNATURE,
};

#[cfg(test)]
mod synth;
