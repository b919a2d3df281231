// Axel '0vercl0k' Souchet - October 18 2026
//! This is where all the raw minidump records are stored in, along with the
//! code that decodes them off their packed, little-endian on-disk layout.
use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};

/// `MDMP`.
pub const EXPECTED_DUMP_SIGNATURE: u32 = 0x504d_444d;

pub const EXCEPTION_MAXIMUM_PARAMETERS: usize = 15;

/// A record with a fixed on-disk size. `SIZE` is the packed size in the file,
/// which has nothing to do with the size of the Rust type.
pub(crate) trait Record: Sized {
    const SIZE: usize;

    /// Decode the record off `reader`, which is expected to hold at least
    /// `SIZE` bytes.
    fn decode<R: Read>(reader: &mut R) -> io::Result<Self>;
}

impl Record for u32 {
    const SIZE: usize = 4;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u32::<LittleEndian>()
    }
}

impl Record for u64 {
    const SIZE: usize = 8;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u64::<LittleEndian>()
    }
}

/// The type of a stream, as found in its [`Directory`] entry. The set of tags
/// is open-ended, so anything this crate doesn't know about is kept around as
/// [`StreamType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamType {
    Unused,
    Reserved0,
    Reserved1,
    ThreadList,
    ModuleList,
    MemoryList,
    Exception,
    SystemInfo,
    ThreadExList,
    Memory64List,
    CommentA,
    CommentW,
    HandleData,
    FunctionTable,
    UnloadedModuleList,
    MiscInfo,
    MemoryInfoList,
    ThreadInfoList,
    HandleOperationList,
    Token,
    JavascriptData,
    SystemMemoryInfo,
    ProcessVmCounters,
    IptTrace,
    ThreadNames,
    /// A tag this crate has no name for; vendors are free to use those.
    Unknown(u32),
}

impl From<u32> for StreamType {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Unused,
            1 => Self::Reserved0,
            2 => Self::Reserved1,
            3 => Self::ThreadList,
            4 => Self::ModuleList,
            5 => Self::MemoryList,
            6 => Self::Exception,
            7 => Self::SystemInfo,
            8 => Self::ThreadExList,
            9 => Self::Memory64List,
            10 => Self::CommentA,
            11 => Self::CommentW,
            12 => Self::HandleData,
            13 => Self::FunctionTable,
            14 => Self::UnloadedModuleList,
            15 => Self::MiscInfo,
            16 => Self::MemoryInfoList,
            17 => Self::ThreadInfoList,
            18 => Self::HandleOperationList,
            19 => Self::Token,
            20 => Self::JavascriptData,
            21 => Self::SystemMemoryInfo,
            22 => Self::ProcessVmCounters,
            23 => Self::IptTrace,
            24 => Self::ThreadNames,
            raw => Self::Unknown(raw),
        }
    }
}

impl From<StreamType> for u32 {
    fn from(value: StreamType) -> Self {
        match value {
            StreamType::Unused => 0,
            StreamType::Reserved0 => 1,
            StreamType::Reserved1 => 2,
            StreamType::ThreadList => 3,
            StreamType::ModuleList => 4,
            StreamType::MemoryList => 5,
            StreamType::Exception => 6,
            StreamType::SystemInfo => 7,
            StreamType::ThreadExList => 8,
            StreamType::Memory64List => 9,
            StreamType::CommentA => 10,
            StreamType::CommentW => 11,
            StreamType::HandleData => 12,
            StreamType::FunctionTable => 13,
            StreamType::UnloadedModuleList => 14,
            StreamType::MiscInfo => 15,
            StreamType::MemoryInfoList => 16,
            StreamType::ThreadInfoList => 17,
            StreamType::HandleOperationList => 18,
            StreamType::Token => 19,
            StreamType::JavascriptData => 20,
            StreamType::SystemMemoryInfo => 21,
            StreamType::ProcessVmCounters => 22,
            StreamType::IptTrace => 23,
            StreamType::ThreadNames => 24,
            StreamType::Unknown(raw) => raw,
        }
    }
}

/// Processor architecture of the dumped process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    /// Intel x86.
    X86,
    Mips,
    Alpha,
    Ppc,
    Shx,
    Arm,
    /// Intel Itanium.
    Ia64,
    Alpha64,
    Msil,
    /// Intel x64.
    X64,
    Ia32OnWin64,
    Neutral,
    Arm64,
    Arm32OnWin64,
    Ia32OnArm64,
    Aarch64,
    Unknown(u16),
}

impl Arch {
    /// Are pointers 8 bytes wide on this architecture?
    pub fn is_64bit(&self) -> bool {
        matches!(self, Self::X64 | Self::Ia64 | Self::Arm64 | Self::Aarch64)
    }
}

impl From<u16> for Arch {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::X86,
            1 => Self::Mips,
            2 => Self::Alpha,
            3 => Self::Ppc,
            4 => Self::Shx,
            5 => Self::Arm,
            6 => Self::Ia64,
            7 => Self::Alpha64,
            8 => Self::Msil,
            9 => Self::X64,
            10 => Self::Ia32OnWin64,
            11 => Self::Neutral,
            12 => Self::Arm64,
            13 => Self::Arm32OnWin64,
            14 => Self::Ia32OnArm64,
            15 => Self::Aarch64,
            raw => Self::Unknown(raw),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Header {
    pub signature: u32,
    pub version: u16,
    pub implementation_version: u16,
    pub number_of_streams: u32,
    pub stream_directory_rva: u32,
    pub checksum: u32,
    pub time_date_stamp: u32,
    pub flags: u64,
}

impl Header {
    /// Does the header carry the right magic and at least one stream?
    pub fn is_valid(&self) -> bool {
        self.signature == EXPECTED_DUMP_SIGNATURE && self.number_of_streams > 0
    }
}

impl Record for Header {
    const SIZE: usize = 0x20;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            signature: reader.read_u32::<LittleEndian>()?,
            version: reader.read_u16::<LittleEndian>()?,
            implementation_version: reader.read_u16::<LittleEndian>()?,
            number_of_streams: reader.read_u32::<LittleEndian>()?,
            stream_directory_rva: reader.read_u32::<LittleEndian>()?,
            checksum: reader.read_u32::<LittleEndian>()?,
            time_date_stamp: reader.read_u32::<LittleEndian>()?,
            flags: reader.read_u64::<LittleEndian>()?,
        })
    }
}

/// Where a blob of data lives in the file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LocationDescriptor32 {
    pub data_size: u32,
    pub rva: u32,
}

impl Record for LocationDescriptor32 {
    const SIZE: usize = 0x8;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            data_size: reader.read_u32::<LittleEndian>()?,
            rva: reader.read_u32::<LittleEndian>()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directory {
    pub stream_type: StreamType,
    pub location: LocationDescriptor32,
}

impl Record for Directory {
    const SIZE: usize = 0xc;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            stream_type: reader.read_u32::<LittleEndian>()?.into(),
            location: LocationDescriptor32::decode(reader)?,
        })
    }
}

/// The system info stream. The two feature words pack the CPUID information
/// of the machine the dump was taken on.
#[derive(Debug, Default, Clone)]
pub struct SystemInfo {
    pub processor_arch: u16,
    pub processor_level: u16,
    pub processor_revision: u16,
    pub number_of_processors: u8,
    pub product_type: u8,
    pub major_version: u32,
    pub minor_version: u32,
    pub build_number: u32,
    pub platform_id: u32,
    pub csd_version_rva: u32,
    pub suite_mask: u16,
    pub reserved2: u16,
    pub processor_features: [u64; 2],
}

impl SystemInfo {
    /// Get the architecture of the dumped process.
    pub fn arch(&self) -> Arch {
        self.processor_arch.into()
    }

    /// The three CPUID vendor id words.
    pub fn vendor_id(&self) -> [u32; 3] {
        let [f0, f1] = self.processor_features;

        [f0 as u32, (f0 >> 32) as u32, f1 as u32]
    }

    pub fn version_information(&self) -> u32 {
        (self.processor_features[1] >> 32) as u32
    }

    pub fn feature_information(&self) -> u32 {
        self.processor_features[0] as u32
    }

    pub fn amd_extended_cpu_features(&self) -> u32 {
        (self.processor_features[0] >> 32) as u32
    }
}

impl Record for SystemInfo {
    const SIZE: usize = 0x30;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            processor_arch: reader.read_u16::<LittleEndian>()?,
            processor_level: reader.read_u16::<LittleEndian>()?,
            processor_revision: reader.read_u16::<LittleEndian>()?,
            number_of_processors: reader.read_u8()?,
            product_type: reader.read_u8()?,
            major_version: reader.read_u32::<LittleEndian>()?,
            minor_version: reader.read_u32::<LittleEndian>()?,
            build_number: reader.read_u32::<LittleEndian>()?,
            platform_id: reader.read_u32::<LittleEndian>()?,
            csd_version_rva: reader.read_u32::<LittleEndian>()?,
            suite_mask: reader.read_u16::<LittleEndian>()?,
            reserved2: reader.read_u16::<LittleEndian>()?,
            processor_features: [
                reader.read_u64::<LittleEndian>()?,
                reader.read_u64::<LittleEndian>()?,
            ],
        })
    }
}

#[derive(Default, Debug, Clone)]
pub struct ExceptionRecord {
    pub exception_code: u32,
    pub exception_flags: u32,
    pub exception_record: u64,
    pub exception_address: u64,
    pub number_parameters: u32,
    pub unused_alignment: u32,
    pub exception_information: [u64; EXCEPTION_MAXIMUM_PARAMETERS],
}

impl Record for ExceptionRecord {
    const SIZE: usize = 0x98;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut record = Self {
            exception_code: reader.read_u32::<LittleEndian>()?,
            exception_flags: reader.read_u32::<LittleEndian>()?,
            exception_record: reader.read_u64::<LittleEndian>()?,
            exception_address: reader.read_u64::<LittleEndian>()?,
            number_parameters: reader.read_u32::<LittleEndian>()?,
            unused_alignment: reader.read_u32::<LittleEndian>()?,
            ..Default::default()
        };
        reader.read_u64_into::<LittleEndian>(&mut record.exception_information)?;

        Ok(record)
    }
}

#[derive(Default, Debug, Clone)]
pub struct ExceptionStream {
    pub thread_id: u32,
    pub alignment: u32,
    pub exception_record: ExceptionRecord,
    pub thread_context: LocationDescriptor32,
}

impl Record for ExceptionStream {
    const SIZE: usize = 0xa8;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            thread_id: reader.read_u32::<LittleEndian>()?,
            alignment: reader.read_u32::<LittleEndian>()?,
            exception_record: ExceptionRecord::decode(reader)?,
            thread_context: LocationDescriptor32::decode(reader)?,
        })
    }
}

#[derive(Default, Debug, Clone)]
pub struct MiscInfo {
    pub size_of_info: u32,
    pub flags1: u32,
    pub process_id: u32,
    pub process_create_time: u32,
    pub process_user_time: u32,
    pub process_kernel_time: u32,
    pub processor_max_mhz: u32,
    pub processor_current_mhz: u32,
    pub processor_mhz_limit: u32,
    pub processor_max_idle_state: u32,
    pub processor_current_idle_state: u32,
}

impl Record for MiscInfo {
    const SIZE: usize = 0x2c;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            size_of_info: reader.read_u32::<LittleEndian>()?,
            flags1: reader.read_u32::<LittleEndian>()?,
            process_id: reader.read_u32::<LittleEndian>()?,
            process_create_time: reader.read_u32::<LittleEndian>()?,
            process_user_time: reader.read_u32::<LittleEndian>()?,
            process_kernel_time: reader.read_u32::<LittleEndian>()?,
            processor_max_mhz: reader.read_u32::<LittleEndian>()?,
            processor_current_mhz: reader.read_u32::<LittleEndian>()?,
            processor_mhz_limit: reader.read_u32::<LittleEndian>()?,
            processor_max_idle_state: reader.read_u32::<LittleEndian>()?,
            processor_current_idle_state: reader.read_u32::<LittleEndian>()?,
        })
    }
}

#[derive(Default, Debug)]
pub(crate) struct MemoryInfo {
    pub base_address: u64,
    pub allocation_base: u64,
    pub allocation_protect: u32,
    _alignment1: u32,
    pub region_size: u64,
    pub state: u32,
    pub protect: u32,
    pub type_: u32,
    _alignment2: u32,
}

impl Record for MemoryInfo {
    const SIZE: usize = 0x30;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            base_address: reader.read_u64::<LittleEndian>()?,
            allocation_base: reader.read_u64::<LittleEndian>()?,
            allocation_protect: reader.read_u32::<LittleEndian>()?,
            _alignment1: reader.read_u32::<LittleEndian>()?,
            region_size: reader.read_u64::<LittleEndian>()?,
            state: reader.read_u32::<LittleEndian>()?,
            protect: reader.read_u32::<LittleEndian>()?,
            type_: reader.read_u32::<LittleEndian>()?,
            _alignment2: reader.read_u32::<LittleEndian>()?,
        })
    }
}

#[derive(Default, Debug)]
pub(crate) struct MemoryInfoListStream {
    _size_of_header: u32,
    pub size_of_entry: u32,
    pub number_of_entries: u64,
}

impl Record for MemoryInfoListStream {
    const SIZE: usize = 0x10;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            _size_of_header: reader.read_u32::<LittleEndian>()?,
            size_of_entry: reader.read_u32::<LittleEndian>()?,
            number_of_entries: reader.read_u64::<LittleEndian>()?,
        })
    }
}

#[derive(Default, Debug)]
pub(crate) struct Memory64ListStream {
    pub number_of_memory_ranges: u64,
    pub base_rva: u64,
}

impl Record for Memory64ListStream {
    const SIZE: usize = 0x10;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            number_of_memory_ranges: reader.read_u64::<LittleEndian>()?,
            base_rva: reader.read_u64::<LittleEndian>()?,
        })
    }
}

#[derive(Default, Debug)]
pub(crate) struct MemoryDescriptor64 {
    pub start_of_memory_range: u64,
    pub data_size: u64,
}

impl Record for MemoryDescriptor64 {
    const SIZE: usize = 0x10;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            start_of_memory_range: reader.read_u64::<LittleEndian>()?,
            data_size: reader.read_u64::<LittleEndian>()?,
        })
    }
}

#[derive(Default, Debug)]
pub(crate) struct MemoryDescriptor {
    pub start_of_memory_range: u64,
    pub memory: LocationDescriptor32,
}

impl Record for MemoryDescriptor {
    const SIZE: usize = 0x10;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            start_of_memory_range: reader.read_u64::<LittleEndian>()?,
            memory: LocationDescriptor32::decode(reader)?,
        })
    }
}

/// A thread entry. Note that the two locators are stored offset first, unlike
/// [`LocationDescriptor32`].
#[derive(Default, Debug)]
pub(crate) struct ThreadEntry {
    pub thread_id: u32,
    pub suspend_count: u32,
    pub priority_class: u32,
    pub priority: u32,
    pub teb: u64,
    pub stack: LocationDescriptor32,
    pub thread_context: LocationDescriptor32,
}

impl Record for ThreadEntry {
    const SIZE: usize = 0x28;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        let thread_id = reader.read_u32::<LittleEndian>()?;
        let suspend_count = reader.read_u32::<LittleEndian>()?;
        let priority_class = reader.read_u32::<LittleEndian>()?;
        let priority = reader.read_u32::<LittleEndian>()?;
        let teb = reader.read_u64::<LittleEndian>()?;
        let stack_rva = reader.read_u32::<LittleEndian>()?;
        let stack_size = reader.read_u32::<LittleEndian>()?;
        let context_rva = reader.read_u32::<LittleEndian>()?;
        let context_size = reader.read_u32::<LittleEndian>()?;

        Ok(Self {
            thread_id,
            suspend_count,
            priority_class,
            priority,
            teb,
            stack: LocationDescriptor32 {
                data_size: stack_size,
                rva: stack_rva,
            },
            thread_context: LocationDescriptor32 {
                data_size: context_size,
                rva: context_rva,
            },
        })
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFileInfo {
    pub signature: u32,
    pub struc_version: u32,
    pub file_version_ms: u32,
    pub file_version_ls: u32,
    pub product_version_ms: u32,
    pub product_version_ls: u32,
    pub file_flags_mask: u32,
    pub file_flags: u32,
    pub file_os: u32,
    pub file_type: u32,
    pub file_subtype: u32,
    pub file_date_ms: u32,
    pub file_date_ls: u32,
}

impl Record for FixedFileInfo {
    const SIZE: usize = 0x34;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut words = [0u32; 13];
        reader.read_u32_into::<LittleEndian>(&mut words)?;
        let [
            signature,
            struc_version,
            file_version_ms,
            file_version_ls,
            product_version_ms,
            product_version_ls,
            file_flags_mask,
            file_flags,
            file_os,
            file_type,
            file_subtype,
            file_date_ms,
            file_date_ls,
        ] = words;

        Ok(Self {
            signature,
            struc_version,
            file_version_ms,
            file_version_ls,
            product_version_ms,
            product_version_ls,
            file_flags_mask,
            file_flags,
            file_os,
            file_type,
            file_subtype,
            file_date_ms,
            file_date_ls,
        })
    }
}

#[derive(Default, Debug)]
pub(crate) struct ModuleEntry {
    pub base_of_image: u64,
    pub size_of_image: u32,
    pub checksum: u32,
    pub time_date_stamp: u32,
    pub module_name_rva: u32,
    pub version_info: FixedFileInfo,
    pub cv_record: LocationDescriptor32,
    pub misc_record: LocationDescriptor32,
    _reserved0: u64,
    _reserved1: u64,
}

impl Record for ModuleEntry {
    const SIZE: usize = 0x6c;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            base_of_image: reader.read_u64::<LittleEndian>()?,
            size_of_image: reader.read_u32::<LittleEndian>()?,
            checksum: reader.read_u32::<LittleEndian>()?,
            time_date_stamp: reader.read_u32::<LittleEndian>()?,
            module_name_rva: reader.read_u32::<LittleEndian>()?,
            version_info: FixedFileInfo::decode(reader)?,
            cv_record: LocationDescriptor32::decode(reader)?,
            misc_record: LocationDescriptor32::decode(reader)?,
            _reserved0: reader.read_u64::<LittleEndian>()?,
            _reserved1: reader.read_u64::<LittleEndian>()?,
        })
    }
}

#[derive(Default, Debug)]
pub(crate) struct HandleDataStream {
    _size_of_header: u32,
    pub size_of_descriptor: u32,
    pub number_of_descriptors: u32,
    _reserved: u32,
}

impl Record for HandleDataStream {
    const SIZE: usize = 0x10;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            _size_of_header: reader.read_u32::<LittleEndian>()?,
            size_of_descriptor: reader.read_u32::<LittleEndian>()?,
            number_of_descriptors: reader.read_u32::<LittleEndian>()?,
            _reserved: reader.read_u32::<LittleEndian>()?,
        })
    }
}

#[derive(Default, Debug)]
pub(crate) struct HandleDescriptor {
    pub handle: u64,
    pub type_name_rva: u32,
    pub object_name_rva: u32,
    pub attributes: u32,
    pub granted_access: u32,
    pub handle_count: u32,
    pub pointer_count: u32,
}

impl Record for HandleDescriptor {
    const SIZE: usize = 0x20;

    fn decode<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            handle: reader.read_u64::<LittleEndian>()?,
            type_name_rva: reader.read_u32::<LittleEndian>()?,
            object_name_rva: reader.read_u32::<LittleEndian>()?,
            attributes: reader.read_u32::<LittleEndian>()?,
            granted_access: reader.read_u32::<LittleEndian>()?,
            handle_count: reader.read_u32::<LittleEndian>()?,
            pointer_count: reader.read_u32::<LittleEndian>()?,
        })
    }
}
