// src/error.rs
use crate::types::DataType;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TdmsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Truncated read at offset {offset}: requested {requested} bytes, {available} available")]
    TruncatedRead { offset: u64, requested: usize, available: u64 },

    #[error("Invalid TDMS tag at offset {offset}: expected TDSm, found {found}")]
    InvalidTag { offset: u64, found: String },

    #[error("Unsupported TDMS version {version:#x} at offset {offset} (only 2.0 / 0x1269 is supported)")]
    UnsupportedVersion { offset: u64, version: u32 },

    #[error("No previous raw data index for object {0}")]
    MissingInheritedDescriptor(String),

    #[error("Unsupported raw data index {index:#x} for object {path}")]
    UnsupportedRawIndexMode { path: String, index: u32 },

    #[error("Data type {data_type:?} is not allowed for property {name}")]
    InvalidPropertyType { name: String, data_type: DataType },

    #[error("Unknown data type: {0:#x}")]
    UnknownDataType(u32),

    #[error("Invalid UTF-8 in string data at offset {offset}")]
    InvalidUtf8 { offset: u64 },

    #[error("Structure sink misuse: {0}")]
    SinkMisuse(String),
}

pub type Result<T> = std::result::Result<T, TdmsError>;
