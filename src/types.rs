// src/types.rs
use std::fmt;

/// TDMS data type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DataType {
    Void = 0,
    I8 = 1,
    I16 = 2,
    I32 = 3,
    I64 = 4,
    U8 = 5,
    U16 = 6,
    U32 = 7,
    U64 = 8,
    SingleFloat = 9,
    DoubleFloat = 10,
    ExtendedFloat = 11,
    SingleFloatWithUnit = 0x19,
    DoubleFloatWithUnit = 0x1A,
    ExtendedFloatWithUnit = 0x1B,
    String = 0x20,
    Boolean = 0x21,
    TimeStamp = 0x44,
    FixedPoint = 0x4F,
    ComplexSingleFloat = 0x08000c,
    ComplexDoubleFloat = 0x10000d,
    DAQmxRawData = 0xFFFFFFFF,
}

impl DataType {
    /// Size in bytes of an extended (80 bit) float
    pub const EXTENDED_FLOAT_SIZE: usize = 10;
    /// Size in bytes of a 128 bit fixed point value
    pub const FIXED_POINT_SIZE: usize = 16;

    /// Get the fixed size of this data type in bytes, or None if variable-sized
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            DataType::Void => Some(0),
            DataType::I8 | DataType::U8 | DataType::Boolean => Some(1),
            DataType::I16 | DataType::U16 => Some(2),
            DataType::I32 | DataType::U32 | DataType::SingleFloat | DataType::SingleFloatWithUnit => Some(4),
            DataType::I64 | DataType::U64 | DataType::DoubleFloat | DataType::DoubleFloatWithUnit => Some(8),
            DataType::ExtendedFloat | DataType::ExtendedFloatWithUnit => Some(Self::EXTENDED_FLOAT_SIZE),
            DataType::ComplexSingleFloat => Some(8),
            DataType::TimeStamp | DataType::ComplexDoubleFloat => Some(16),
            DataType::FixedPoint => Some(Self::FIXED_POINT_SIZE),
            DataType::String | DataType::DAQmxRawData => None,
        }
    }

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(DataType::Void),
            1 => Some(DataType::I8),
            2 => Some(DataType::I16),
            3 => Some(DataType::I32),
            4 => Some(DataType::I64),
            5 => Some(DataType::U8),
            6 => Some(DataType::U16),
            7 => Some(DataType::U32),
            8 => Some(DataType::U64),
            9 => Some(DataType::SingleFloat),
            10 => Some(DataType::DoubleFloat),
            11 => Some(DataType::ExtendedFloat),
            0x19 => Some(DataType::SingleFloatWithUnit),
            0x1A => Some(DataType::DoubleFloatWithUnit),
            0x1B => Some(DataType::ExtendedFloatWithUnit),
            0x20 => Some(DataType::String),
            0x21 => Some(DataType::Boolean),
            0x44 => Some(DataType::TimeStamp),
            0x4F => Some(DataType::FixedPoint),
            0x08000c => Some(DataType::ComplexSingleFloat),
            0x10000d => Some(DataType::ComplexDoubleFloat),
            0xFFFFFFFF => Some(DataType::DAQmxRawData),
            _ => None,
        }
    }

    /// Map DAQmx internal type codes to TDMS DataType
    pub fn from_daqmx_type_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(DataType::U8),
            1 => Some(DataType::I8),
            2 => Some(DataType::U16),
            3 => Some(DataType::I16),
            4 => Some(DataType::U32),
            5 => Some(DataType::I32),
            6 => Some(DataType::U64),
            7 => Some(DataType::I64),
            8 => Some(DataType::SingleFloat),
            9 => Some(DataType::DoubleFloat),
            0xFFFFFFFF => Some(DataType::TimeStamp),
            _ => None,
        }
    }

    /// The numeric type code as stored on disk
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get the name of the data type as a string
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Void => "Void",
            DataType::I8 => "I8",
            DataType::I16 => "I16",
            DataType::I32 => "I32",
            DataType::I64 => "I64",
            DataType::U8 => "U8",
            DataType::U16 => "U16",
            DataType::U32 => "U32",
            DataType::U64 => "U64",
            DataType::SingleFloat => "SingleFloat",
            DataType::DoubleFloat => "DoubleFloat",
            DataType::ExtendedFloat => "ExtendedFloat",
            DataType::SingleFloatWithUnit => "SingleFloatWithUnit",
            DataType::DoubleFloatWithUnit => "DoubleFloatWithUnit",
            DataType::ExtendedFloatWithUnit => "ExtendedFloatWithUnit",
            DataType::String => "String",
            DataType::Boolean => "Boolean",
            DataType::TimeStamp => "TimeStamp",
            DataType::FixedPoint => "FixedPoint",
            DataType::ComplexSingleFloat => "ComplexSingleFloat",
            DataType::ComplexDoubleFloat => "ComplexDoubleFloat",
            DataType::DAQmxRawData => "DAQmxRawData",
        }
    }

    /// Name for an arbitrary type code; codes outside the registry are "Unknown"
    pub fn name_of(code: u32) -> &'static str {
        DataType::from_u32(code).map_or("Unknown", |dt| dt.name())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Table of Contents flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocFlags(u32);

impl TocFlags {
    pub const METADATA: u32 = 1 << 1;
    pub const NEW_OBJ_LIST: u32 = 1 << 2;
    pub const RAW_DATA: u32 = 1 << 3;
    pub const INTERLEAVED: u32 = 1 << 5;
    pub const BIG_ENDIAN: u32 = 1 << 6;
    pub const DAQMX_RAW_DATA: u32 = 1 << 7;

    pub fn new(flags: u32) -> Self {
        TocFlags(flags)
    }

    pub fn has_metadata(&self) -> bool {
        self.0 & Self::METADATA != 0
    }

    pub fn has_new_obj_list(&self) -> bool {
        self.0 & Self::NEW_OBJ_LIST != 0
    }

    pub fn has_raw_data(&self) -> bool {
        self.0 & Self::RAW_DATA != 0
    }

    pub fn is_interleaved(&self) -> bool {
        self.0 & Self::INTERLEAVED != 0
    }

    pub fn is_big_endian(&self) -> bool {
        self.0 & Self::BIG_ENDIAN != 0
    }

    pub fn has_daqmx_data(&self) -> bool {
        self.0 & Self::DAQMX_RAW_DATA != 0
    }

    pub fn raw_value(&self) -> u32 {
        self.0
    }
}

/// TDMS timestamp (seconds since 1904-01-01 00:00:00 UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    /// Seconds since epoch (1904-01-01)
    pub seconds: i64,
    /// Fractions of a second (units of 2^-64)
    pub fractions: u64,
}

/// A property value as decoded from segment metadata
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Float(f32),
    Double(f64),
    /// 80 bit float, kept as the stored bytes
    Extended([u8; DataType::EXTENDED_FLOAT_SIZE]),
    String(String),
    /// Stored byte; any nonzero value is true
    Boolean(u8),
    Timestamp(Timestamp),
    /// 128 bit fixed point, kept as the stored bytes
    FixedPoint([u8; DataType::FIXED_POINT_SIZE]),
    ComplexFloat { real: f32, imaginary: f32 },
    ComplexDouble { real: f64, imaginary: f64 },
}

impl PropertyValue {
    pub fn data_type(&self) -> DataType {
        match self {
            PropertyValue::I8(_) => DataType::I8,
            PropertyValue::I16(_) => DataType::I16,
            PropertyValue::I32(_) => DataType::I32,
            PropertyValue::I64(_) => DataType::I64,
            PropertyValue::U8(_) => DataType::U8,
            PropertyValue::U16(_) => DataType::U16,
            PropertyValue::U32(_) => DataType::U32,
            PropertyValue::U64(_) => DataType::U64,
            PropertyValue::Float(_) => DataType::SingleFloat,
            PropertyValue::Double(_) => DataType::DoubleFloat,
            PropertyValue::Extended(_) => DataType::ExtendedFloat,
            PropertyValue::String(_) => DataType::String,
            PropertyValue::Boolean(_) => DataType::Boolean,
            PropertyValue::Timestamp(_) => DataType::TimeStamp,
            PropertyValue::FixedPoint(_) => DataType::FixedPoint,
            PropertyValue::ComplexFloat { .. } => DataType::ComplexSingleFloat,
            PropertyValue::ComplexDouble { .. } => DataType::ComplexDoubleFloat,
        }
    }
}

/// Represents a property with name and value
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Property {
            name: name.into(),
            value,
        }
    }
}
