// Axel '0vercl0k' Souchet - October 18 2026
//! This module is where the parsing logic is implemented. A [`Minidump`] is
//! built by walking the stream directory and decoding every stream type this
//! crate knows about; the result is immutable and can be shared across threads.
//! Memory contents are read lazily through a [`Reader`] (cf
//! [`Minidump::open_reader`]).
use std::path;

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::map::{Cursor, Source};
use crate::reader::Reader;
use crate::structs::*;

/// Maximum number of ranges read off a single memory64 list stream. Anything
/// past it is ignored.
pub const MAX_MEMORY_RANGES: u64 = 10_000;

/// Maximum number of entries read off a single memory info list stream.
/// Anything past it is ignored.
pub const MAX_MEMORY_INFO_ENTRIES: u64 = 10_000;

/// Exclusive upper bound on the byte length of a name. Names with a length of
/// zero or of at least this many bytes are treated as absent.
pub const MAX_NAME_LENGTH: u32 = 2048;

/// Disables all access to the committed region of pages.
pub const PAGE_NOACCESS: u32 = 1;
/// Enables read-only access to the committed region of pages.
pub const PAGE_READONLY: u32 = 2;
/// Enables read-only or read/write access to the committed region of pages.
pub const PAGE_READWRITE: u32 = 4;
/// Enables read-only or copy-on-write access to a mapped view of a file
/// mapping object.
pub const PAGE_WRITECOPY: u32 = 8;
/// Enables execute access to the committed region of pages.
pub const PAGE_EXECUTE: u32 = 16;
/// Enables execute or read-only access to the committed region of pages.
pub const PAGE_EXECUTE_READ: u32 = 32;
/// Enables execute, read-only, or read/write access to the committed region
/// of pages.
pub const PAGE_EXECUTE_READWRITE: u32 = 64;
/// Enables execute, read-only, or copy-on-write access to a mapped view of a
/// file mapping object.
pub const PAGE_EXECUTE_WRITECOPY: u32 = 128;
/// Pages in the region become guard pages.
pub const PAGE_GUARD: u32 = 256;
/// Sets all pages to be non-cachable.
pub const PAGE_NOCACHE: u32 = 512;
/// Sets all pages to be write-combined.
pub const PAGE_WRITECOMBINE: u32 = 1024;

/// The region is backed by physical storage.
pub const MEM_COMMIT: u32 = 0x1000;
/// The region is reserved but not backed by physical storage.
pub const MEM_RESERVE: u32 = 0x2000;
/// The region is free.
pub const MEM_FREE: u32 = 0x1_0000;

/// The pages are private to the process.
pub const MEM_PRIVATE: u32 = 0x2_0000;
/// The pages are mapped into a view of a section.
pub const MEM_MAPPED: u32 = 0x4_0000;
/// The pages are mapped into a view of an image section.
pub const MEM_IMAGE: u32 = 0x100_0000;

/// The memory rights constants make it annoying to know if a page is readable
/// / writable / executable, so we have to create our own masks. A page is
/// readable if it is protected with any of the below rights.
const READABLE: u32 = PAGE_READONLY
    | PAGE_READWRITE
    | PAGE_EXECUTE_READ
    | PAGE_EXECUTE_READWRITE
    | PAGE_EXECUTE_WRITECOPY
    | PAGE_WRITECOPY;

/// A page is writable if it is protected with any of the below rights.
const WRITABLE: u32 = PAGE_READWRITE | PAGE_EXECUTE_READWRITE | PAGE_WRITECOPY;
/// A page is executable if it is protected with any of the below rights.
const EXECUTABLE: u32 =
    PAGE_EXECUTE | PAGE_EXECUTE_READ | PAGE_EXECUTE_READWRITE | PAGE_EXECUTE_WRITECOPY;

/// A module loaded in the virtual address space.
#[allow(clippy::len_without_is_empty)]
#[derive(Default, Debug, Clone)]
pub struct Module {
    /// Where the module got loaded at.
    pub base_of_image: u64,
    /// Size of the image in memory.
    pub size_of_image: u32,
    /// PE checksum of the module.
    pub checksum: u32,
    /// Timestamp.
    pub time_date_stamp: u32,
    /// The fixed part of the version resource.
    pub version_info: FixedFileInfo,
    /// Where the CodeView record is stored in the file.
    pub cv_record: LocationDescriptor32,
    /// Where the misc debug record is stored in the file.
    pub misc_record: LocationDescriptor32,
    /// The module path, keeping only its ASCII characters. [`None`] if the
    /// dump doesn't carry a usable name.
    pub name: Option<String>,
}

impl Module {
    /// Build a new [`Module`] instance.
    fn new(entry: ModuleEntry, name: Option<String>) -> Self {
        Self {
            base_of_image: entry.base_of_image,
            size_of_image: entry.size_of_image,
            checksum: entry.checksum,
            time_date_stamp: entry.time_date_stamp,
            version_info: entry.version_info,
            cv_record: entry.cv_record,
            misc_record: entry.misc_record,
            name,
        }
    }

    /// Get the file name of the module, i.e. the last component of its path.
    pub fn file_name(&self) -> Option<&str> {
        let name = self.name.as_deref()?;

        name.rsplit(['\\', '/']).next()
    }

    /// Get the address of where the module was loaded at.
    pub fn start_addr(&self) -> u64 {
        self.base_of_image
    }

    /// Get the address right after the last byte of the module. This
    /// saturates instead of wrapping around the address space.
    pub fn end_addr(&self) -> u64 {
        self.base_of_image.saturating_add(self.len())
    }

    /// Get the length of the range of memory the module was loaded at.
    pub fn len(&self) -> u64 {
        self.size_of_image.into()
    }

    /// Is `address` in `[start_addr, start_addr + len)`?
    pub fn contains(&self, address: u64) -> bool {
        address >= self.base_of_image && address - self.base_of_image < self.len()
    }
}

/// A thread that was running when the dump was generated. Its context is
/// kept as a raw blob; read it with [`Reader::read_location`].
#[derive(Debug, Default, Clone)]
pub struct Thread {
    /// The thread ID.
    pub id: u32,
    /// The suspend count counter.
    pub suspend_count: u32,
    /// The priority class.
    pub priority_class: u32,
    /// Thread priority.
    pub priority: u32,
    /// The thread environment block address.
    pub teb: u64,
    /// Where the captured stack bytes are stored in the file.
    pub stack: LocationDescriptor32,
    /// Where the saved register context is stored in the file.
    pub context: LocationDescriptor32,
}

impl From<ThreadEntry> for Thread {
    fn from(entry: ThreadEntry) -> Self {
        Self {
            id: entry.thread_id,
            suspend_count: entry.suspend_count,
            priority_class: entry.priority_class,
            priority: entry.priority,
            teb: entry.teb,
            stack: entry.stack,
            context: entry.thread_context,
        }
    }
}

/// A contiguous range of the address space whose bytes were captured in the
/// dump, and where they live in the file.
#[allow(clippy::len_without_is_empty)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySegment {
    /// Virtual address of the first byte.
    pub start: u64,
    /// Number of bytes captured.
    pub len: u64,
    /// Offset of the first byte in the file.
    pub file_offset: u64,
}

impl MemorySegment {
    /// Is `address` in `[start, start + len)`?
    pub fn contains(&self, address: u64) -> bool {
        address >= self.start && address - self.start < self.len
    }

    /// Is `[address, address + len)` entirely inside this segment?
    pub fn contains_range(&self, address: u64, len: u64) -> bool {
        self.contains(address) && len <= self.len - (address - self.start)
    }

    /// Get the address right after the last byte of the segment. This
    /// saturates instead of wrapping around the address space.
    pub fn end_addr(&self) -> u64 {
        self.start.saturating_add(self.len)
    }

    pub fn len(&self) -> u64 {
        self.len
    }
}

/// A region of the address space as reported by the OS. A region only carries
/// protection metadata; whether its bytes were captured is what the
/// [`MemorySegment`]s tell.
#[allow(clippy::len_without_is_empty)]
#[derive(Default, Debug, Clone)]
pub struct MemoryRegion {
    /// Virtual address of the first byte of the region.
    pub base_address: u64,
    /// The base of the allocation that gave life to this memory region.
    pub allocation_base: u64,
    /// The page protection used at allocation time.
    pub allocation_protect: u32,
    /// Size of the region in bytes.
    pub region_size: u64,
    /// The state of the memory region ([`MEM_COMMIT`], [`MEM_RESERVE`] or
    /// [`MEM_FREE`]).
    pub state: u32,
    /// The page protection currently applied to the memory region.
    pub protect: u32,
    /// The type of memory region ([`MEM_IMAGE`], [`MEM_MAPPED`] or
    /// [`MEM_PRIVATE`]).
    pub type_: u32,
}

impl MemoryRegion {
    /// Is the memory region readable?
    pub fn is_readable(&self) -> bool {
        (self.protect & READABLE) != 0
    }

    /// Is the memory region writable?
    pub fn is_writable(&self) -> bool {
        (self.protect & WRITABLE) != 0
    }

    /// Is the memory region executable?
    pub fn is_executable(&self) -> bool {
        (self.protect & EXECUTABLE) != 0
    }

    pub fn is_committed(&self) -> bool {
        self.state == MEM_COMMIT
    }

    pub fn is_free(&self) -> bool {
        self.state == MEM_FREE
    }

    /// Is `address` in `[base_address, base_address + region_size)`?
    pub fn contains(&self, address: u64) -> bool {
        address >= self.base_address && address - self.base_address < self.region_size
    }

    pub fn len(&self) -> u64 {
        self.region_size
    }
}

/// Convert a [`MemoryInfo`] into a [`MemoryRegion`].
impl From<MemoryInfo> for MemoryRegion {
    fn from(value: MemoryInfo) -> Self {
        Self {
            base_address: value.base_address,
            allocation_base: value.allocation_base,
            allocation_protect: value.allocation_protect,
            region_size: value.region_size,
            state: value.state,
            protect: value.protect,
            type_: value.type_,
        }
    }
}

/// A handle that the process had open when the dump was generated.
#[derive(Default, Debug, Clone)]
pub struct Handle {
    /// The handle value.
    pub handle: u64,
    /// The object type ("File", "Event", ...), if the dump carries it.
    pub type_name: Option<String>,
    /// The object name, if the dump carries it.
    pub object_name: Option<String>,
    pub attributes: u32,
    pub granted_access: u32,
    pub handle_count: u32,
    pub pointer_count: u32,
}

impl Handle {
    fn new(descriptor: HandleDescriptor, type_name: Option<String>, object_name: Option<String>) -> Self {
        Self {
            handle: descriptor.handle,
            type_name,
            object_name,
            attributes: descriptor.attributes,
            granted_access: descriptor.granted_access,
            handle_count: descriptor.handle_count,
            pointer_count: descriptor.pointer_count,
        }
    }
}

/// Where the bytes of a [`Minidump`] come from. Readers open their own
/// [`Source`] over it.
#[derive(Debug)]
enum Backing {
    File(path::PathBuf),
    Buffer(Vec<u8>),
}

/// Everything fished out of a minidump file: threads, modules, the layout of
/// the address space and the optional singleton streams.
#[derive(Debug)]
pub struct Minidump {
    header: Header,
    directory: Vec<Directory>,
    threads: Vec<Thread>,
    modules: Vec<Module>,
    memory_segments: Vec<MemorySegment>,
    memory_regions: Vec<MemoryRegion>,
    system_info: Option<SystemInfo>,
    exception: Option<ExceptionStream>,
    misc_info: Option<MiscInfo>,
    handles: Vec<Handle>,
    backing: Backing,
}

impl Minidump {
    /// Parse the dump stored in the file at `path`.
    pub fn parse<P: AsRef<path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut cursor = Cursor::new(Source::open(path)?);

        Self::with_cursor(&mut cursor, Backing::File(path.to_path_buf()))
    }

    /// Parse a dump that is already in memory. The bytes are kept around so
    /// that readers can resolve addresses later.
    pub fn parse_buffer(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        let mut dump = {
            let mut cursor = Cursor::new(Source::from(bytes.as_slice()));
            Self::with_cursor(&mut cursor, Backing::Buffer(Vec::new()))?
        };
        dump.backing = Backing::Buffer(bytes);

        Ok(dump)
    }

    /// Open a [`Reader`] to resolve virtual addresses. Every reader owns its
    /// own handle on the underlying bytes, so they can be used independently
    /// (from different threads, for example).
    pub fn open_reader(&self) -> Result<Reader<'_>> {
        let source = match &self.backing {
            Backing::File(path) => Source::open(path)?,
            Backing::Buffer(bytes) => Source::from(bytes.as_slice()),
        };

        Ok(Reader::new(self, source))
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Get the stream directory, streams this crate doesn't decode included.
    pub fn directory(&self) -> &[Directory] {
        &self.directory
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Find a [`Thread`] with a specific TID.
    pub fn get_thread(&self, id: u32) -> Option<&Thread> {
        self.threads.iter().find(|thread| thread.id == id)
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Find the first [`Module`] that includes `address` in its range.
    pub fn get_module(&self, address: u64) -> Option<&Module> {
        self.modules.iter().find(|module| module.contains(address))
    }

    /// Get the captured memory segments, in the order they were found.
    pub fn memory_segments(&self) -> &[MemorySegment] {
        &self.memory_segments
    }

    pub fn memory_regions(&self) -> &[MemoryRegion] {
        &self.memory_regions
    }

    /// Find the first [`MemoryRegion`] that includes `address` in its range.
    pub fn find_region(&self, address: u64) -> Option<&MemoryRegion> {
        self.memory_regions
            .iter()
            .find(|region| region.contains(address))
    }

    pub fn system_info(&self) -> Option<&SystemInfo> {
        self.system_info.as_ref()
    }

    pub fn exception(&self) -> Option<&ExceptionStream> {
        self.exception.as_ref()
    }

    pub fn misc_info(&self) -> Option<&MiscInfo> {
        self.misc_info.as_ref()
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    /// The thread id of the thread that hit the exception, if any.
    pub fn foreground_tid(&self) -> Option<u32> {
        self.exception.as_ref().map(|exception| exception.thread_id)
    }

    /// Get the architecture of the dumped process. This is
    /// [`Arch::Unknown`] when the dump has no system info stream.
    pub fn arch(&self) -> Arch {
        self.system_info
            .as_ref()
            .map_or(Arch::Unknown(0xffff), SystemInfo::arch)
    }

    fn with_cursor(cursor: &mut Cursor, backing: Backing) -> Result<Self> {
        // Read the header.
        let header = read_struct::<Header>(cursor)?;

        // If we don't see the expected signature, or there's nothing to parse,
        // bail.
        if !header.is_valid() {
            return Err(if header.signature != EXPECTED_DUMP_SIGNATURE {
                Error::InvalidSignature(header.signature)
            } else {
                Error::NoStreams
            });
        }

        debug!(
            streams = header.number_of_streams,
            directory = header.stream_directory_rva,
            "header looks good"
        );

        // Move to the stream directory and read every entry. Running out of
        // bytes before the declared count is reached means the file is
        // truncated.
        cursor.seek(header.stream_directory_rva.into())?;
        let directory = (0..header.number_of_streams)
            .map(|_| read_struct::<Directory>(cursor))
            .collect::<Result<Vec<_>>>()?;

        let mut dump = Self {
            header,
            directory: Vec::new(),
            threads: Vec::new(),
            modules: Vec::new(),
            memory_segments: Vec::new(),
            memory_regions: Vec::new(),
            system_info: None,
            exception: None,
            misc_info: None,
            handles: Vec::new(),
            backing,
        };

        // Decode the streams in file order. A failure in a stream we know
        // about is fatal; streams we don't know about are skipped.
        for entry in &directory {
            dump.parse_stream(cursor, entry)
                .map_err(|err| err.in_stream(entry.stream_type))?;
        }

        dump.directory = directory;

        Ok(dump)
    }

    /// Route a directory entry to the decoder of its stream type.
    fn parse_stream(&mut self, cursor: &mut Cursor, entry: &Directory) -> Result<()> {
        let location = entry.location;
        match entry.stream_type {
            StreamType::ThreadList => {
                let threads = parse_thread_list(cursor, location)?;
                self.threads.extend(threads);
            }
            StreamType::ModuleList => {
                let modules = parse_module_list(cursor, location)?;
                self.modules.extend(modules);
            }
            StreamType::MemoryList => {
                let segments = parse_mem_list(cursor, location)?;
                self.memory_segments.extend(segments);
            }
            StreamType::Memory64List => {
                let segments = parse_mem64_list(cursor, location)?;
                self.memory_segments.extend(segments);
            }
            StreamType::MemoryInfoList => {
                let regions = parse_mem_info_list(cursor, location)?;
                self.memory_regions.extend(regions);
            }
            StreamType::HandleData => {
                let handles = parse_handle_data(cursor, location)?;
                self.handles.extend(handles);
            }
            StreamType::SystemInfo => {
                let system_info = read_struct_at::<SystemInfo>(cursor, location)?;
                if self.system_info.replace(system_info).is_some() {
                    warn!("more than one system info stream, keeping the last one");
                }
            }
            StreamType::Exception => {
                let exception = read_struct_at::<ExceptionStream>(cursor, location)?;
                if self.exception.replace(exception).is_some() {
                    warn!("more than one exception stream, keeping the last one");
                }
            }
            StreamType::MiscInfo => {
                let misc_info = read_struct_at::<MiscInfo>(cursor, location)?;
                if self.misc_info.replace(misc_info).is_some() {
                    warn!("more than one misc info stream, keeping the last one");
                }
            }
            other => {
                trace!(stream_type = u32::from(other), "skipping stream");
                return Ok(());
            }
        }

        trace!(stream_type = ?entry.stream_type, rva = location.rva, "parsed stream");

        Ok(())
    }
}

/// Parse the thread list.
fn parse_thread_list(cursor: &mut Cursor, location: LocationDescriptor32) -> Result<Vec<Thread>> {
    cursor.seek(location.rva.into())?;
    let number_of_threads = read_struct::<u32>(cursor)?;

    (0..number_of_threads)
        .map(|_| read_struct::<ThreadEntry>(cursor).map(Thread::from))
        .collect()
}

/// Parse the module list and resolve the module names.
fn parse_module_list(cursor: &mut Cursor, location: LocationDescriptor32) -> Result<Vec<Module>> {
    cursor.seek(location.rva.into())?;
    let number_of_modules = read_struct::<u32>(cursor)?;

    // Read the fixed part of every entry first, the names are stored
    // out-of-line.
    let entries = (0..number_of_modules)
        .map(|_| read_struct::<ModuleEntry>(cursor))
        .collect::<Result<Vec<_>>>()?;

    entries
        .into_iter()
        .map(|entry| {
            let name = read_name(cursor, entry.module_name_rva)?;

            Ok(Module::new(entry, name))
        })
        .collect()
}

/// Parse the memory list stream. Every descriptor says where its bytes are in
/// the file.
fn parse_mem_list(
    cursor: &mut Cursor,
    location: LocationDescriptor32,
) -> Result<Vec<MemorySegment>> {
    cursor.seek(location.rva.into())?;
    let number_of_ranges = u64::from(read_struct::<u32>(cursor)?);
    if number_of_ranges > MAX_MEMORY_RANGES {
        warn!(
            number_of_ranges,
            "too many memory ranges, only reading the first {MAX_MEMORY_RANGES}"
        );
    }

    let mut segments = Vec::new();
    for _ in 0..number_of_ranges.min(MAX_MEMORY_RANGES) {
        let descriptor = read_struct::<MemoryDescriptor>(cursor)?;
        if descriptor.memory.data_size == 0 {
            continue;
        }

        segments.push(MemorySegment {
            start: descriptor.start_of_memory_range,
            len: descriptor.memory.data_size.into(),
            file_offset: descriptor.memory.rva.into(),
        });
    }

    Ok(segments)
}

/// Parse the memory64 list stream. The bytes of the ranges are stored back to
/// back starting at `base_rva`, so the file offset of a range is the sum of
/// the sizes of the ranges before it.
fn parse_mem64_list(
    cursor: &mut Cursor,
    location: LocationDescriptor32,
) -> Result<Vec<MemorySegment>> {
    cursor.seek(location.rva.into())?;
    let mem_list = read_struct::<Memory64ListStream>(cursor)?;

    let number_of_ranges = mem_list.number_of_memory_ranges;
    if number_of_ranges > MAX_MEMORY_RANGES {
        warn!(
            number_of_ranges,
            "too many memory ranges, only reading the first {MAX_MEMORY_RANGES}"
        );
    }

    let mut data_offset = mem_list.base_rva;
    let mut segments = Vec::new();
    for _ in 0..number_of_ranges.min(MAX_MEMORY_RANGES) {
        let descriptor = read_struct::<MemoryDescriptor64>(cursor)?;
        if descriptor.data_size == 0 {
            continue;
        }

        segments.push(MemorySegment {
            start: descriptor.start_of_memory_range,
            len: descriptor.data_size,
            file_offset: data_offset,
        });

        // Bump the offset by the size of this range to find where the next
        // one is at.
        data_offset = data_offset.saturating_add(descriptor.data_size);
    }

    Ok(segments)
}

/// Parse the memory info list stream.
fn parse_mem_info_list(
    cursor: &mut Cursor,
    location: LocationDescriptor32,
) -> Result<Vec<MemoryRegion>> {
    cursor.seek(location.rva.into())?;
    let mem_info_list = read_struct::<MemoryInfoListStream>(cursor)?;

    // Only the layout we know about is supported.
    let expected = MemoryInfo::SIZE as u32;
    if mem_info_list.size_of_entry != expected {
        return Err(Error::EntrySizeMismatch {
            expected,
            found: mem_info_list.size_of_entry,
        });
    }

    let number_of_entries = mem_info_list.number_of_entries;
    if number_of_entries > MAX_MEMORY_INFO_ENTRIES {
        warn!(
            number_of_entries,
            "too many memory info entries, only reading the first {MAX_MEMORY_INFO_ENTRIES}"
        );
    }

    (0..number_of_entries.min(MAX_MEMORY_INFO_ENTRIES))
        .map(|_| read_struct::<MemoryInfo>(cursor).map(MemoryRegion::from))
        .collect()
}

/// Parse the handle data stream and resolve the type / object names.
fn parse_handle_data(cursor: &mut Cursor, location: LocationDescriptor32) -> Result<Vec<Handle>> {
    cursor.seek(location.rva.into())?;
    let handle_data = read_struct::<HandleDataStream>(cursor)?;

    // Newer dumps have bigger descriptors; the fields we know about always
    // come first.
    let padding = u64::from(handle_data.size_of_descriptor)
        .saturating_sub(HandleDescriptor::SIZE as u64);

    let mut descriptors = Vec::new();
    for _ in 0..handle_data.number_of_descriptors {
        descriptors.push(read_struct::<HandleDescriptor>(cursor)?);
        cursor.skip(padding)?;
    }

    descriptors
        .into_iter()
        .map(|descriptor| {
            let type_name = read_name(cursor, descriptor.type_name_rva)?;
            let object_name = read_name(cursor, descriptor.object_name_rva)?;

            Ok(Handle::new(descriptor, type_name, object_name))
        })
        .collect()
}

/// Read the name stored at `rva` without moving the cursor. A name that is
/// missing, empty, too long or truncated comes back as [`None`].
fn read_name(cursor: &mut Cursor, rva: u32) -> Result<Option<String>> {
    if rva == 0 {
        return Ok(None);
    }

    let name = cursor.scoped(|cursor| {
        cursor.seek(rva.into())?;
        let length = read_struct::<u32>(cursor)?;
        if length == 0 || length >= MAX_NAME_LENGTH {
            debug!(rva, length, "ignoring name with a bogus length");
            return Ok(None);
        }

        let bytes = cursor.read_exact(length as usize)?;

        Ok(Some(ascii_from_utf16(&bytes)))
    });

    match name {
        Err(Error::ShortRead { offset, wanted }) => {
            warn!(rva, offset, wanted, "name is truncated, ignoring it");
            Ok(None)
        }
        name => name,
    }
}

/// Decode UTF-16LE bytes keeping only the ASCII characters; everything else
/// (NUL, surrogates, non-ASCII code units) is dropped.
fn ascii_from_utf16(slice: &[u8]) -> String {
    slice
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .filter(|&unit| unit != 0 && unit < 0x80)
        .map(|unit| char::from(unit as u8))
        .collect()
}

/// Read a `T` from the cursor.
fn read_struct<T: Record>(cursor: &mut Cursor) -> Result<T> {
    let bytes = cursor.read_exact(T::SIZE)?;

    Ok(T::decode(&mut bytes.as_slice())?)
}

/// Read a `T` stored at `location`.
fn read_struct_at<T: Record>(cursor: &mut Cursor, location: LocationDescriptor32) -> Result<T> {
    cursor.seek(location.rva.into())?;

    read_struct(cursor)
}
