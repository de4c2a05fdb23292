// tests/common/mod.rs
//! Builders for synthetic TDMS files
#![allow(dead_code)]

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use tdms_dump::TocFlags;

pub const TOC_METADATA: u32 = TocFlags::METADATA;
pub const TOC_NEW_OBJ_LIST: u32 = TocFlags::NEW_OBJ_LIST;
pub const TOC_RAW_DATA: u32 = TocFlags::RAW_DATA;
pub const TOC_INTERLEAVED: u32 = TocFlags::INTERLEAVED;
pub const TOC_BIG_ENDIAN: u32 = TocFlags::BIG_ENDIAN;

/// Metadata, new object list and raw data: the usual first segment
pub const TOC_FULL: u32 = TOC_METADATA | TOC_NEW_OBJ_LIST | TOC_RAW_DATA;

/// Builds one segment: lead-in, object list and raw data.
///
/// Multi-byte fields are written in the byte order selected by the
/// big-endian bit of the table of contents.
pub struct SegmentBuilder {
    tag: [u8; 4],
    toc: u32,
    version: u32,
    object_count: u32,
    objects: Vec<u8>,
    pending_properties: Option<(usize, u32)>,
    raw_data: Vec<u8>,
    next_segment_offset: Option<u64>,
}

impl SegmentBuilder {
    pub fn new(toc: u32) -> Self {
        SegmentBuilder {
            tag: *b"TDSm",
            toc,
            version: 0x1269,
            object_count: 0,
            objects: Vec::new(),
            pending_properties: None,
            raw_data: Vec::new(),
            next_segment_offset: None,
        }
    }

    fn big_endian(&self) -> bool {
        self.toc & TOC_BIG_ENDIAN != 0
    }

    fn put_u32(&self, buf: &mut Vec<u8>, v: u32) {
        if self.big_endian() {
            buf.write_u32::<BigEndian>(v).unwrap();
        } else {
            buf.write_u32::<LittleEndian>(v).unwrap();
        }
    }

    fn put_u64(&self, buf: &mut Vec<u8>, v: u64) {
        if self.big_endian() {
            buf.write_u64::<BigEndian>(v).unwrap();
        } else {
            buf.write_u64::<LittleEndian>(v).unwrap();
        }
    }

    fn put_string(&self, buf: &mut Vec<u8>, s: &str) {
        self.put_u32(buf, s.len() as u32);
        buf.extend_from_slice(s.as_bytes());
    }

    /// Value bytes in this segment's byte order, from little-endian input
    fn ordered(&self, le_bytes: &[u8]) -> Vec<u8> {
        let mut bytes = le_bytes.to_vec();
        if self.big_endian() {
            bytes.reverse();
        }
        bytes
    }

    pub fn tag(mut self, tag: &[u8; 4]) -> Self {
        self.tag = *tag;
        self
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Mark the segment as running to the end of the file
    pub fn incomplete(mut self) -> Self {
        self.next_segment_offset = Some(0xFFFF_FFFF_FFFF_FFFF);
        self
    }

    pub fn next_segment_offset(mut self, offset: u64) -> Self {
        self.next_segment_offset = Some(offset);
        self
    }

    fn start_object(&mut self, path: &str, raw_index: u32) {
        self.close_object();
        let mut buf = std::mem::take(&mut self.objects);
        self.put_string(&mut buf, path);
        self.put_u32(&mut buf, raw_index);
        self.objects = buf;
        self.object_count += 1;
    }

    fn open_properties(&mut self) {
        let mut buf = std::mem::take(&mut self.objects);
        let at = buf.len();
        self.put_u32(&mut buf, 0);
        self.objects = buf;
        self.pending_properties = Some((at, 0));
    }

    fn close_object(&mut self) {
        if let Some((at, count)) = self.pending_properties.take() {
            let mut patch = Vec::new();
            self.put_u32(&mut patch, count);
            self.objects[at..at + 4].copy_from_slice(&patch);
        }
    }

    /// Object without raw data (root, group, or channel without data here)
    pub fn object(mut self, path: &str) -> Self {
        self.start_object(path, 0xFFFF_FFFF);
        self.open_properties();
        self
    }

    /// Channel with a new 0x14 raw data index
    pub fn channel(mut self, path: &str, data_type: u32, dimension: u32, values: u64) -> Self {
        self.start_object(path, 0x14);
        let mut buf = std::mem::take(&mut self.objects);
        self.put_u32(&mut buf, data_type);
        self.put_u32(&mut buf, dimension);
        self.put_u64(&mut buf, values);
        self.objects = buf;
        self.open_properties();
        self
    }

    /// Channel with a new 0x1c raw data index carrying a total byte size
    pub fn string_channel(mut self, path: &str, values: u64, total_size: u64) -> Self {
        self.start_object(path, 0x1c);
        let mut buf = std::mem::take(&mut self.objects);
        self.put_u32(&mut buf, 0x20);
        self.put_u32(&mut buf, 1);
        self.put_u64(&mut buf, values);
        self.put_u64(&mut buf, total_size);
        self.objects = buf;
        self.open_properties();
        self
    }

    /// Channel reusing its previous raw data index
    pub fn inherited_channel(mut self, path: &str) -> Self {
        self.start_object(path, 0);
        self.open_properties();
        self
    }

    /// Channel with a DAQmx scaler index (0x1269 or 0x1369): one scaler, one width.
    ///
    /// `raw_offset` is a byte offset for format changing scalers and a bit
    /// offset for digital line scalers.
    pub fn daqmx_channel(
        mut self,
        path: &str,
        raw_index: u32,
        chunk_size: u64,
        daqmx_type: u32,
        raw_offset: u32,
        width: u32,
    ) -> Self {
        self.start_object(path, raw_index);
        let mut buf = std::mem::take(&mut self.objects);
        self.put_u32(&mut buf, 0xFFFF_FFFF);
        self.put_u32(&mut buf, 1);
        self.put_u64(&mut buf, chunk_size);
        self.put_u32(&mut buf, 1);
        for field in [daqmx_type, 0, raw_offset, 0, 0] {
            self.put_u32(&mut buf, field);
        }
        self.put_u32(&mut buf, 1);
        self.put_u32(&mut buf, width);
        self.objects = buf;
        self.open_properties();
        self
    }

    /// Object with an arbitrary raw data index word and nothing else
    pub fn raw_index(mut self, path: &str, raw_index: u32) -> Self {
        self.start_object(path, raw_index);
        self.open_properties();
        self
    }

    /// Property on the most recent object; `le_value` is the little-endian encoding
    pub fn property(mut self, name: &str, data_type: u32, le_value: &[u8]) -> Self {
        let value = self.ordered(le_value);
        let mut buf = std::mem::take(&mut self.objects);
        self.put_string(&mut buf, name);
        self.put_u32(&mut buf, data_type);
        buf.extend_from_slice(&value);
        self.objects = buf;
        if let Some((_, count)) = self.pending_properties.as_mut() {
            *count += 1;
        }
        self
    }

    pub fn property_i32(self, name: &str, value: i32) -> Self {
        self.property(name, 0x03, &value.to_le_bytes())
    }

    pub fn property_f64(self, name: &str, value: f64) -> Self {
        self.property(name, 0x0A, &value.to_le_bytes())
    }

    pub fn property_string(mut self, name: &str, value: &str) -> Self {
        let mut encoded = Vec::new();
        self.put_string(&mut encoded, value);
        let mut buf = std::mem::take(&mut self.objects);
        self.put_string(&mut buf, name);
        self.put_u32(&mut buf, 0x20);
        buf.extend_from_slice(&encoded);
        self.objects = buf;
        if let Some((_, count)) = self.pending_properties.as_mut() {
            *count += 1;
        }
        self
    }

    pub fn property_timestamp(mut self, name: &str, seconds: i64, fractions: u64) -> Self {
        let mut buf = std::mem::take(&mut self.objects);
        self.put_string(&mut buf, name);
        self.put_u32(&mut buf, 0x44);
        self.put_u64(&mut buf, seconds as u64);
        self.put_u64(&mut buf, fractions);
        self.objects = buf;
        if let Some((_, count)) = self.pending_properties.as_mut() {
            *count += 1;
        }
        self
    }

    /// Append `len` bytes of raw data (content is irrelevant to the walker)
    pub fn raw_data(mut self, len: usize) -> Self {
        self.raw_data.extend(std::iter::repeat(0xA5).take(len));
        self
    }

    /// Lead-in, metadata and raw data of this segment
    pub fn build(mut self) -> Vec<u8> {
        self.close_object();

        let mut metadata = Vec::new();
        if self.toc & TOC_METADATA != 0 {
            self.put_u32(&mut metadata, self.object_count);
            metadata.extend_from_slice(&self.objects);
        }

        let raw_data_offset = metadata.len() as u64;
        let next_segment_offset = self
            .next_segment_offset
            .unwrap_or(raw_data_offset + self.raw_data.len() as u64);

        let mut bytes = self.tag.to_vec();
        bytes.write_u32::<LittleEndian>(self.toc).unwrap();
        let mut rest = Vec::new();
        self.put_u32(&mut rest, self.version);
        self.put_u64(&mut rest, next_segment_offset);
        self.put_u64(&mut rest, raw_data_offset);
        bytes.extend_from_slice(&rest);
        bytes.extend_from_slice(&metadata);
        bytes.extend_from_slice(&self.raw_data);
        bytes
    }
}

/// Concatenate built segments into a file image
pub fn file(segments: Vec<SegmentBuilder>) -> Vec<u8> {
    segments.into_iter().flat_map(SegmentBuilder::build).collect()
}
