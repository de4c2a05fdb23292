// src/metadata/daqmx.rs
use crate::error::Result;
use crate::reader::SegmentReader;
use crate::sink::{StructureSink, StructureSinkExt};
use crate::source::ByteSource;
use crate::types::DataType;
use smallvec::SmallVec;

pub const FORMAT_CHANGING_SCALER: u32 = 0x00001269;
pub const DIGITAL_LINE_SCALER: u32 = 0x00001369;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalerKind {
    FormatChanging,
    DigitalLine,
}

impl ScalerKind {
    pub fn from_raw_index(index: u32) -> Option<Self> {
        match index {
            FORMAT_CHANGING_SCALER => Some(ScalerKind::FormatChanging),
            DIGITAL_LINE_SCALER => Some(ScalerKind::DigitalLine),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScalerKind::FormatChanging => "raw data contains DAQmx Format Changing scaler",
            ScalerKind::DigitalLine => "raw data contains DAQmx Digital Line scaler",
        }
    }
}

/// Scalers and buffer widths following a DAQmx raw data index
#[derive(Debug, Clone, PartialEq)]
pub struct DaqMxMetadata {
    pub kind: ScalerKind,
    pub scalers: SmallVec<[Scaler; 2]>,
    /// Elements per raw buffer
    pub raw_data_widths: SmallVec<[u32; 4]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaler {
    /// DAQmx type code, not a TDMS one
    pub data_type_code: u32,
    pub raw_buffer_index: u32,
    /// Byte offset for format-changing scalers, bit offset for digital line scalers
    pub raw_offset: u32,
    pub sample_format_bitmap: u32,
    pub scale_id: u32,
}

impl DaqMxMetadata {
    /// Read the scaler list and width vector.
    ///
    /// The data type, dimension and chunk size that precede them are read by
    /// the caller, as for any other raw data index.
    pub fn read<S: ByteSource + ?Sized>(reader: &mut SegmentReader<'_, S>, kind: ScalerKind) -> Result<Self> {
        let scaler_count = reader.read_u32()?;
        let mut scalers = SmallVec::new();
        for _ in 0..scaler_count {
            scalers.push(Scaler::read(reader)?);
        }

        let width_count = reader.read_u32()?;
        let mut raw_data_widths = SmallVec::new();
        for _ in 0..width_count {
            raw_data_widths.push(reader.read_u32()?);
        }

        Ok(DaqMxMetadata {
            kind,
            scalers,
            raw_data_widths,
        })
    }

    pub fn emit(&self, sink: &mut dyn StructureSink) -> Result<()> {
        sink.add("format_changing_scalers_size", self.scalers.len())?;
        sink.enter("format_changing_scalers")?;
        for scaler in &self.scalers {
            scaler.emit(self.kind, sink)?;
        }
        sink.leave()?;

        sink.add("data_with_size_vector_size", self.raw_data_widths.len())?;
        sink.enter("data_with_size_vector")?;
        for &width in &self.raw_data_widths {
            sink.add("size", width)?;
        }
        sink.leave()
    }
}

impl Scaler {
    pub fn read<S: ByteSource + ?Sized>(reader: &mut SegmentReader<'_, S>) -> Result<Self> {
        Ok(Scaler {
            data_type_code: reader.read_u32()?,
            raw_buffer_index: reader.read_u32()?,
            raw_offset: reader.read_u32()?,
            sample_format_bitmap: reader.read_u32()?,
            scale_id: reader.read_u32()?,
        })
    }

    pub fn data_type(&self) -> Option<DataType> {
        DataType::from_daqmx_type_code(self.data_type_code)
    }

    pub fn raw_byte_offset(&self, kind: ScalerKind) -> u32 {
        match kind {
            ScalerKind::FormatChanging => self.raw_offset,
            ScalerKind::DigitalLine => self.raw_offset / 8,
        }
    }

    pub fn raw_bit_offset(&self, kind: ScalerKind) -> Option<u32> {
        match kind {
            ScalerKind::FormatChanging => None,
            ScalerKind::DigitalLine => Some(self.raw_offset),
        }
    }

    fn emit(&self, kind: ScalerKind, sink: &mut dyn StructureSink) -> Result<()> {
        sink.enter("format_changing_scaler")?;
        sink.add("data_type", self.data_type_code)?;
        sink.add("data_type_string", self.data_type().map_or("Unknown", |dt| dt.name()))?;
        sink.add("buffer_index", self.raw_buffer_index)?;
        if let Some(bits) = self.raw_bit_offset(kind) {
            sink.add("bit_offset_within_the_stride", bits)?;
        }
        sink.add("byte_offset_within_the_stride", self.raw_byte_offset(kind))?;
        sink.add("sample_format_bitmap", self.sample_format_bitmap)?;
        sink.add("scale_id", self.scale_id)?;
        sink.leave()
    }
}
