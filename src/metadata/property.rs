// src/metadata/property.rs
use crate::error::{TdmsError, Result};
use crate::reader::SegmentReader;
use crate::sink::{StructureSink, StructureSinkExt};
use crate::source::ByteSource;
use crate::types::{DataType, Property, PropertyValue, Timestamp};
use log::trace;

/// Read one property: name, type code, then the value in that type's encoding
pub fn read_property<S: ByteSource + ?Sized>(reader: &mut SegmentReader<'_, S>) -> Result<Property> {
    let name = reader.read_string()?;
    let code = reader.read_u32()?;
    let value = read_property_value(reader, &name, code)?;
    trace!("property {} = {:?}", name, value);
    Ok(Property { name, value })
}

pub fn read_property_value<S: ByteSource + ?Sized>(
    reader: &mut SegmentReader<'_, S>,
    name: &str,
    code: u32,
) -> Result<PropertyValue> {
    let data_type = DataType::from_u32(code).ok_or(TdmsError::UnknownDataType(code))?;

    let value = match data_type {
        DataType::I8 => PropertyValue::I8(reader.read_i8()?),
        DataType::I16 => PropertyValue::I16(reader.read_i16()?),
        DataType::I32 => PropertyValue::I32(reader.read_i32()?),
        DataType::I64 => PropertyValue::I64(reader.read_i64()?),
        DataType::U8 => PropertyValue::U8(reader.read_u8()?),
        DataType::U16 => PropertyValue::U16(reader.read_u16()?),
        DataType::U32 => PropertyValue::U32(reader.read_u32()?),
        DataType::U64 => PropertyValue::U64(reader.read_u64()?),
        DataType::SingleFloat => PropertyValue::Float(reader.read_f32()?),
        DataType::DoubleFloat => PropertyValue::Double(reader.read_f64()?),
        DataType::ExtendedFloat => PropertyValue::Extended(reader.read_blob()?),
        DataType::String => PropertyValue::String(reader.read_string()?),
        DataType::Boolean => PropertyValue::Boolean(reader.read_u8()?),
        DataType::TimeStamp => {
            let seconds = reader.read_i64()?;
            let fractions = reader.read_u64()?;
            PropertyValue::Timestamp(Timestamp { seconds, fractions })
        }
        DataType::FixedPoint => PropertyValue::FixedPoint(reader.read_blob()?),
        DataType::ComplexSingleFloat => PropertyValue::ComplexFloat {
            real: reader.read_f32()?,
            imaginary: reader.read_f32()?,
        },
        DataType::ComplexDoubleFloat => PropertyValue::ComplexDouble {
            real: reader.read_f64()?,
            imaginary: reader.read_f64()?,
        },
        DataType::Void
        | DataType::SingleFloatWithUnit
        | DataType::DoubleFloatWithUnit
        | DataType::ExtendedFloatWithUnit
        | DataType::DAQmxRawData => {
            return Err(TdmsError::InvalidPropertyType {
                name: name.to_string(),
                data_type,
            })
        }
    };
    Ok(value)
}

impl Property {
    pub fn emit(&self, sink: &mut dyn StructureSink) -> Result<()> {
        let data_type = self.value.data_type();
        sink.enter("property")?;
        sink.add("name", &self.name)?;
        sink.add("data_type", data_type.code())?;
        sink.add("data_type_string", data_type.name())?;
        self.value.emit(sink)?;
        sink.leave()
    }
}

impl PropertyValue {
    /// Emit as a `value` leaf, or a `value` node for the paired types
    pub fn emit(&self, sink: &mut dyn StructureSink) -> Result<()> {
        match self {
            PropertyValue::I8(v) => sink.add("value", *v),
            PropertyValue::I16(v) => sink.add("value", *v),
            PropertyValue::I32(v) => sink.add("value", *v),
            PropertyValue::I64(v) => sink.add("value", *v),
            PropertyValue::U8(v) => sink.add("value", *v),
            PropertyValue::U16(v) => sink.add("value", *v),
            PropertyValue::U32(v) => sink.add("value", *v),
            PropertyValue::U64(v) => sink.add("value", *v),
            PropertyValue::Float(v) => sink.add("value", *v),
            PropertyValue::Double(v) => sink.add("value", *v),
            PropertyValue::Extended(bytes) => sink.add("value", *bytes),
            PropertyValue::FixedPoint(bytes) => sink.add("value", *bytes),
            PropertyValue::String(s) => sink.add("value", s),
            PropertyValue::Boolean(raw) => {
                sink.add("value", *raw != 0)?;
                sink.add("raw_value", *raw)
            }
            PropertyValue::Timestamp(ts) => {
                sink.enter("value")?;
                sink.add("seconds", ts.seconds)?;
                sink.add("fraction", ts.fractions)?;
                sink.leave()
            }
            PropertyValue::ComplexFloat { real, imaginary } => {
                sink.enter("value")?;
                sink.add("real", *real)?;
                sink.add("imaginary", *imaginary)?;
                sink.leave()
            }
            PropertyValue::ComplexDouble { real, imaginary } => {
                sink.enter("value")?;
                sink.add("real", *real)?;
                sink.add("imaginary", *imaginary)?;
                sink.leave()
            }
        }
    }
}
