// Axel '0vercl0k' Souchet - October 18 2026
//! Builds small synthetic dumps for the tests. Data is appended right after
//! the header as streams get added, and the stream directory is written last,
//! at the very end of the file.
use byteorder::{LittleEndian, WriteBytesExt};

use crate::structs::{LocationDescriptor32, EXPECTED_DUMP_SIGNATURE};

const HEADER_SIZE: usize = 0x20;

#[derive(Debug, Default, Clone)]
pub struct ThreadParams {
    pub id: u32,
    pub suspend_count: u32,
    pub priority_class: u32,
    pub priority: u32,
    pub teb: u64,
    pub context: LocationDescriptor32,
}

#[derive(Debug, Default, Clone)]
pub struct ModuleParams {
    pub base: u64,
    pub size: u32,
    pub checksum: u32,
    pub time_date_stamp: u32,
    pub name_rva: u32,
}

#[derive(Debug, Default, Clone)]
pub struct RegionParams {
    pub base: u64,
    pub size: u64,
    pub state: u32,
    pub protect: u32,
    pub type_: u32,
}

#[derive(Debug)]
pub struct DumpBuilder {
    bytes: Vec<u8>,
    directory: Vec<(u32, LocationDescriptor32)>,
    memory64_base: Option<u64>,
}

impl DumpBuilder {
    pub fn new() -> Self {
        Self {
            bytes: vec![0; HEADER_SIZE],
            directory: Vec::new(),
            memory64_base: None,
        }
    }

    /// Append raw bytes and return where they landed.
    pub fn append(&mut self, data: &[u8]) -> u32 {
        let rva = self.bytes.len() as u32;
        self.bytes.extend_from_slice(data);

        rva
    }

    /// Add a directory entry pointing wherever.
    pub fn directory_entry(&mut self, stream_type: u32, data_size: u32, rva: u32) -> &mut Self {
        self.directory
            .push((stream_type, LocationDescriptor32 { data_size, rva }));

        self
    }

    /// Append `payload` and point a new directory entry at it.
    pub fn stream(&mut self, stream_type: u32, payload: &[u8]) -> &mut Self {
        let rva = self.append(payload);

        self.directory_entry(stream_type, payload.len() as u32, rva)
    }

    pub fn unknown_stream(&mut self, stream_type: u32, payload: &[u8]) -> &mut Self {
        self.stream(stream_type, payload)
    }

    /// Append a name sub-record holding `units`, with a declared length of
    /// `length` bytes.
    pub fn name_with_length(&mut self, length: u32, units: &[u16]) -> u32 {
        let mut record = Vec::new();
        record.write_u32::<LittleEndian>(length).unwrap();
        for &unit in units {
            record.write_u16::<LittleEndian>(unit).unwrap();
        }

        self.append(&record)
    }

    pub fn raw_name(&mut self, units: &[u16]) -> u32 {
        self.name_with_length((units.len() * 2) as u32, units)
    }

    pub fn name(&mut self, name: &str) -> u32 {
        self.raw_name(&name.encode_utf16().collect::<Vec<_>>())
    }

    pub fn thread_list(&mut self, threads: &[ThreadParams]) -> &mut Self {
        let mut payload = Vec::new();
        payload
            .write_u32::<LittleEndian>(threads.len() as u32)
            .unwrap();
        for thread in threads {
            for word in [
                thread.id,
                thread.suspend_count,
                thread.priority_class,
                thread.priority,
            ] {
                payload.write_u32::<LittleEndian>(word).unwrap();
            }
            payload.write_u64::<LittleEndian>(thread.teb).unwrap();
            // Stack rva / size, then context rva / size.
            for word in [0, 0, thread.context.rva, thread.context.data_size] {
                payload.write_u32::<LittleEndian>(word).unwrap();
            }
        }

        self.stream(3, &payload)
    }

    pub fn module_list(&mut self, modules: &[ModuleParams]) -> &mut Self {
        let mut payload = Vec::new();
        payload
            .write_u32::<LittleEndian>(modules.len() as u32)
            .unwrap();
        for module in modules {
            payload.write_u64::<LittleEndian>(module.base).unwrap();
            for word in [
                module.size,
                module.checksum,
                module.time_date_stamp,
                module.name_rva,
            ] {
                payload.write_u32::<LittleEndian>(word).unwrap();
            }
            // Version info, CodeView / misc records and the reserved fields.
            payload.extend_from_slice(&[0; 0x34 + 0x8 + 0x8 + 0x10]);
        }

        self.stream(4, &payload)
    }

    /// Append the bytes of every range back to back, then a memory64 list
    /// stream describing them.
    pub fn memory64_list(&mut self, ranges: &[(u64, Vec<u8>)]) -> &mut Self {
        let base_rva = self.bytes.len() as u64;
        for (_, data) in ranges {
            self.bytes.extend_from_slice(data);
        }

        let mut payload = Vec::new();
        payload
            .write_u64::<LittleEndian>(ranges.len() as u64)
            .unwrap();
        payload.write_u64::<LittleEndian>(base_rva).unwrap();
        for (address, data) in ranges {
            payload.write_u64::<LittleEndian>(*address).unwrap();
            payload.write_u64::<LittleEndian>(data.len() as u64).unwrap();
        }

        self.memory64_base = Some(base_rva);
        self.stream(9, &payload)
    }

    /// Where the bytes of the last memory64 list stream start.
    pub fn memory64_base(&self) -> Option<u64> {
        self.memory64_base
    }

    pub fn memory_list(&mut self, ranges: &[(u64, Vec<u8>)]) -> &mut Self {
        let rvas = ranges
            .iter()
            .map(|(_, data)| self.append(data))
            .collect::<Vec<_>>();

        let mut payload = Vec::new();
        payload
            .write_u32::<LittleEndian>(ranges.len() as u32)
            .unwrap();
        for ((address, data), rva) in ranges.iter().zip(rvas) {
            payload.write_u64::<LittleEndian>(*address).unwrap();
            payload.write_u32::<LittleEndian>(data.len() as u32).unwrap();
            payload.write_u32::<LittleEndian>(rva).unwrap();
        }

        self.stream(5, &payload)
    }

    pub fn memory_info_list(&mut self, regions: &[RegionParams]) -> &mut Self {
        self.memory_info_list_with_entry_size(0x30, regions)
    }

    pub fn memory_info_list_with_entry_size(
        &mut self,
        size_of_entry: u32,
        regions: &[RegionParams],
    ) -> &mut Self {
        let mut payload = Vec::new();
        payload.write_u32::<LittleEndian>(0x10).unwrap();
        payload.write_u32::<LittleEndian>(size_of_entry).unwrap();
        payload
            .write_u64::<LittleEndian>(regions.len() as u64)
            .unwrap();
        for region in regions {
            payload.write_u64::<LittleEndian>(region.base).unwrap();
            payload.write_u64::<LittleEndian>(region.base).unwrap();
            payload.write_u32::<LittleEndian>(region.protect).unwrap();
            payload.write_u32::<LittleEndian>(0).unwrap();
            payload.write_u64::<LittleEndian>(region.size).unwrap();
            payload.write_u32::<LittleEndian>(region.state).unwrap();
            payload.write_u32::<LittleEndian>(region.protect).unwrap();
            payload.write_u32::<LittleEndian>(region.type_).unwrap();
            payload.write_u32::<LittleEndian>(0).unwrap();
        }

        self.stream(16, &payload)
    }

    /// A system info stream for an 8 processors Windows 10 box.
    pub fn system_info(&mut self, processor_arch: u16) -> &mut Self {
        let mut payload = Vec::new();
        payload.write_u16::<LittleEndian>(processor_arch).unwrap();
        payload.write_u16::<LittleEndian>(6).unwrap();
        payload.write_u16::<LittleEndian>(0x9e0a).unwrap();
        payload.write_u8(8).unwrap();
        payload.write_u8(1).unwrap();
        for word in [10, 0, 19045, 2, 0] {
            payload.write_u32::<LittleEndian>(word).unwrap();
        }
        payload.write_u16::<LittleEndian>(0x100).unwrap();
        payload.write_u16::<LittleEndian>(0).unwrap();
        payload
            .write_u64::<LittleEndian>(0x6974_6e65_756e_6547)
            .unwrap();
        payload
            .write_u64::<LittleEndian>(0x0009_06ea_6c65_746e)
            .unwrap();

        self.stream(7, &payload)
    }

    pub fn exception(&mut self, thread_id: u32, code: u32, address: u64) -> &mut Self {
        let mut payload = Vec::new();
        payload.write_u32::<LittleEndian>(thread_id).unwrap();
        payload.write_u32::<LittleEndian>(0).unwrap();
        payload.write_u32::<LittleEndian>(code).unwrap();
        payload.write_u32::<LittleEndian>(0).unwrap();
        payload.write_u64::<LittleEndian>(0).unwrap();
        payload.write_u64::<LittleEndian>(address).unwrap();
        payload.write_u32::<LittleEndian>(0).unwrap();
        payload.write_u32::<LittleEndian>(0).unwrap();
        payload.extend_from_slice(&[0; 15 * 8]);
        payload.extend_from_slice(&[0; 8]);

        self.stream(6, &payload)
    }

    pub fn misc_info(&mut self, process_id: u32) -> &mut Self {
        let mut payload = Vec::new();
        payload.write_u32::<LittleEndian>(0x2c).unwrap();
        payload.write_u32::<LittleEndian>(1).unwrap();
        payload.write_u32::<LittleEndian>(process_id).unwrap();
        payload.extend_from_slice(&[0; 8 * 4]);

        self.stream(15, &payload)
    }

    /// A handle data stream; every handle is `(handle, type name rva, object
    /// name rva)`.
    pub fn handle_data(&mut self, size_of_descriptor: u32, handles: &[(u64, u32, u32)]) -> &mut Self {
        let mut payload = Vec::new();
        payload.write_u32::<LittleEndian>(0x10).unwrap();
        payload.write_u32::<LittleEndian>(size_of_descriptor).unwrap();
        payload
            .write_u32::<LittleEndian>(handles.len() as u32)
            .unwrap();
        payload.write_u32::<LittleEndian>(0).unwrap();
        for &(handle, type_name_rva, object_name_rva) in handles {
            let mut descriptor = Vec::new();
            descriptor.write_u64::<LittleEndian>(handle).unwrap();
            for word in [type_name_rva, object_name_rva, 0, 0x1f_0003, 1, 2] {
                descriptor.write_u32::<LittleEndian>(word).unwrap();
            }
            descriptor.resize(size_of_descriptor as usize, 0xcc);
            payload.extend_from_slice(&descriptor);
        }

        self.stream(12, &payload)
    }

    /// Write the header and the directory, and hand back the file.
    pub fn build(&self) -> Vec<u8> {
        let mut bytes = self.bytes.clone();
        let directory_rva = bytes.len() as u32;
        for (stream_type, location) in &self.directory {
            bytes.write_u32::<LittleEndian>(*stream_type).unwrap();
            bytes.write_u32::<LittleEndian>(location.data_size).unwrap();
            bytes.write_u32::<LittleEndian>(location.rva).unwrap();
        }

        let mut header = Vec::with_capacity(HEADER_SIZE);
        header
            .write_u32::<LittleEndian>(EXPECTED_DUMP_SIGNATURE)
            .unwrap();
        header.write_u16::<LittleEndian>(0xa793).unwrap();
        header.write_u16::<LittleEndian>(0).unwrap();
        header
            .write_u32::<LittleEndian>(self.directory.len() as u32)
            .unwrap();
        header.write_u32::<LittleEndian>(directory_rva).unwrap();
        header.write_u32::<LittleEndian>(0).unwrap();
        header.write_u32::<LittleEndian>(0x64c3_6d1e).unwrap();
        header.write_u64::<LittleEndian>(0x1826).unwrap();
        bytes[..HEADER_SIZE].copy_from_slice(&header);

        bytes
    }
}
