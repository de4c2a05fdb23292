// src/segment/header.rs
use crate::error::{TdmsError, Result};
use crate::reader::SegmentReader;
use crate::sink::{StructureSink, StructureSinkExt};
use crate::source::ByteSource;
use crate::types::TocFlags;
use byteorder::{ByteOrder, LittleEndian};

/// TDMS segment lead-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentHeader {
    /// Absolute offset of the lead-in
    pub offset: u64,
    pub toc: TocFlags,
    pub version: u32,
    /// Next segment offset as stored, relative to the end of the lead-in
    pub next_segment_offset: u64,
    /// Raw data offset, relative to the end of the lead-in
    pub raw_data_offset: u64,
}

impl SegmentHeader {
    pub const LEAD_IN_SIZE: usize = 28;
    pub const TDMS_TAG: &'static [u8; 4] = b"TDSm";
    pub const VERSION: u32 = 4713;
    pub const INCOMPLETE_MARKER: u64 = 0xFFFFFFFFFFFFFFFF;

    /// Decode the lead-in at `offset`, field by field.
    ///
    /// The tag and table of contents are byte-order independent; the table of
    /// contents then decides the byte order of everything after it.
    pub fn read<S: ByteSource + ?Sized>(source: &mut S, offset: u64) -> Result<Self> {
        source.seek(offset)?;

        let mut tag_and_toc = [0u8; 8];
        source.read_exact(&mut tag_and_toc)?;
        if &tag_and_toc[..4] != Self::TDMS_TAG {
            return Err(TdmsError::InvalidTag {
                offset,
                found: String::from_utf8_lossy(&tag_and_toc[..4]).into_owned(),
            });
        }
        let toc = TocFlags::new(LittleEndian::read_u32(&tag_and_toc[4..]));

        let mut reader = SegmentReader::new(source, toc.is_big_endian());
        let version = reader.read_u32()?;
        if version != Self::VERSION {
            return Err(TdmsError::UnsupportedVersion { offset, version });
        }
        let next_segment_offset = reader.read_u64()?;
        let raw_data_offset = reader.read_u64()?;

        Ok(SegmentHeader {
            offset,
            toc,
            version,
            next_segment_offset,
            raw_data_offset,
        })
    }

    /// Absolute offset of the first byte after the lead-in
    pub fn segment_start(&self) -> u64 {
        self.offset + Self::LEAD_IN_SIZE as u64
    }

    /// Whether the segment claims to run to the end of the file
    pub fn is_incomplete(&self) -> bool {
        self.next_segment_offset == Self::INCOMPLETE_MARKER
    }

    /// Next segment offset with the end-of-file marker replaced by the real distance
    pub fn resolved_next_segment_offset(&self, file_size: u64) -> u64 {
        if self.is_incomplete() {
            file_size.saturating_sub(self.segment_start())
        } else {
            self.next_segment_offset
        }
    }

    pub fn emit(&self, sink: &mut dyn StructureSink) -> Result<()> {
        sink.add("version", self.version)?;
        sink.enter("table_of_content")?;
        sink.add("meta_data", self.toc.has_metadata())?;
        sink.add("new_obj_list", self.toc.has_new_obj_list())?;
        sink.add("raw_data", self.toc.has_raw_data())?;
        sink.add("interleaved_data", self.toc.is_interleaved())?;
        sink.add("big_endian", self.toc.is_big_endian())?;
        sink.add("daqmx_raw_data", self.toc.has_daqmx_data())?;
        sink.leave()?;
        sink.add("next_segment_offset", self.next_segment_offset)?;
        sink.add("raw_data_offset", self.raw_data_offset)
    }
}
