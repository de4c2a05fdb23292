// src/metadata/raw_data_index.rs
use crate::metadata::daqmx::DaqMxMetadata;
use crate::types::DataType;

/// Raw data layout of one object, as last described by a segment
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRawInfo {
    pub path: String,
    pub data_type: DataType,
    pub array_dimension: u32,
    /// Values per chunk
    pub number_of_values: u64,
    /// Explicit byte size per chunk; only nonzero for variable-size types
    pub total_size_bytes: u64,
    /// Scaler layout for DAQmx raw data
    pub daqmx: Option<DaqMxMetadata>,
}

impl ObjectRawInfo {
    pub fn new(path: impl Into<String>, data_type: DataType, number_of_values: u64) -> Self {
        ObjectRawInfo {
            path: path.into(),
            data_type,
            array_dimension: 1,
            number_of_values,
            total_size_bytes: 0,
            daqmx: None,
        }
    }

    pub fn with_dimension(mut self, array_dimension: u32) -> Self {
        self.array_dimension = array_dimension;
        self
    }

    pub fn with_total_size(mut self, total_size_bytes: u64) -> Self {
        self.total_size_bytes = total_size_bytes;
        self
    }

    /// Bytes this object occupies in one chunk.
    ///
    /// An explicit total size wins; otherwise the type size times dimension
    /// times value count, where variable-size types count as zero.
    pub fn chunk_bytes(&self) -> u64 {
        if self.total_size_bytes != 0 {
            return self.total_size_bytes;
        }
        let type_size = self.data_type.fixed_size().unwrap_or(0) as u64;
        type_size
            .saturating_mul(u64::from(self.array_dimension))
            .saturating_mul(self.number_of_values)
    }
}

/// How an object's raw data is described in one segment
#[derive(Debug, Clone, PartialEq)]
pub enum RawDataIndex {
    /// The object has no raw data in this segment
    NoRawData,
    /// Same layout as the last definition, resolved from earlier segments
    MatchesPrevious(ObjectRawInfo),
    /// A layout defined by this segment
    New(ObjectRawInfo),
}

impl RawDataIndex {
    pub const NO_RAW_DATA: u32 = 0xFFFFFFFF;
    pub const MATCHES_PREVIOUS: u32 = 0x00000000;
    /// Length of a plain index: type, dimension, value count
    pub const STANDARD: u32 = 0x14;
    /// Length of a variable-size index, which adds the total byte size
    pub const WITH_TOTAL_SIZE: u32 = 0x1c;

    pub fn raw_info(&self) -> Option<&ObjectRawInfo> {
        match self {
            RawDataIndex::NoRawData => None,
            RawDataIndex::MatchesPrevious(info) | RawDataIndex::New(info) => Some(info),
        }
    }
}
