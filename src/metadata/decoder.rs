// src/metadata/decoder.rs
use crate::error::{TdmsError, Result};
use crate::metadata::daqmx::{DaqMxMetadata, ScalerKind};
use crate::metadata::property::read_property;
use crate::metadata::{ObjectRawInfo, RawDataIndex, RawInfoMaps};
use crate::reader::SegmentReader;
use crate::sink::{StructureSink, StructureSinkExt};
use crate::source::ByteSource;
use crate::types::{DataType, Property};
use log::trace;

/// One entry of a segment's object list
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMetadata {
    /// Position in the segment's object list
    pub index: u32,
    pub path: String,
    /// The raw data index word as stored
    pub raw_data_index_code: u32,
    pub raw_data_index: RawDataIndex,
    pub properties: Vec<Property>,
}

/// Decode a segment's object list, updating `maps` and emitting each object.
///
/// Objects are emitted as soon as they are decoded, so a failure leaves the
/// sink holding every object before the bad one.
pub fn read_object_list<S: ByteSource + ?Sized>(
    reader: &mut SegmentReader<'_, S>,
    maps: &mut RawInfoMaps,
    sink: &mut dyn StructureSink,
) -> Result<Vec<ObjectMetadata>> {
    let object_count = reader.read_u32()?;
    sink.add("objects_count", object_count)?;
    sink.enter("objects")?;

    // The count comes from the file; don't trust it for preallocation
    let mut objects = Vec::with_capacity(object_count.min(256) as usize);
    for index in 0..object_count {
        let object = read_object(reader, maps, index)?;
        object.emit(sink)?;
        objects.push(object);
    }

    sink.leave()?;
    Ok(objects)
}

/// Decode one object: path, raw data index, then its properties
pub fn read_object<S: ByteSource + ?Sized>(
    reader: &mut SegmentReader<'_, S>,
    maps: &mut RawInfoMaps,
    index: u32,
) -> Result<ObjectMetadata> {
    let path = reader.read_string()?;
    let raw_data_index_code = reader.read_u32()?;
    trace!("object {} {} raw data index {:#x}", index, path, raw_data_index_code);

    let raw_data_index = match raw_data_index_code {
        RawDataIndex::NO_RAW_DATA => RawDataIndex::NoRawData,
        RawDataIndex::MATCHES_PREVIOUS => RawDataIndex::MatchesPrevious(maps.inherit(&path)?),
        RawDataIndex::STANDARD | RawDataIndex::WITH_TOTAL_SIZE => {
            let info = read_raw_info(reader, &path, raw_data_index_code == RawDataIndex::WITH_TOTAL_SIZE)?;
            maps.define(info.clone());
            RawDataIndex::New(info)
        }
        other => match ScalerKind::from_raw_index(other) {
            Some(kind) => {
                let info = read_daqmx_info(reader, &path, kind)?;
                maps.define(info.clone());
                RawDataIndex::New(info)
            }
            None => return Err(TdmsError::UnsupportedRawIndexMode { path, index: other }),
        },
    };

    let property_count = reader.read_u32()?;
    let mut properties = Vec::with_capacity(property_count.min(64) as usize);
    for _ in 0..property_count {
        properties.push(read_property(reader)?);
    }

    Ok(ObjectMetadata {
        index,
        path,
        raw_data_index_code,
        raw_data_index,
        properties,
    })
}

fn read_data_type<S: ByteSource + ?Sized>(reader: &mut SegmentReader<'_, S>) -> Result<DataType> {
    let code = reader.read_u32()?;
    DataType::from_u32(code).ok_or(TdmsError::UnknownDataType(code))
}

fn read_raw_info<S: ByteSource + ?Sized>(
    reader: &mut SegmentReader<'_, S>,
    path: &str,
    has_total_size: bool,
) -> Result<ObjectRawInfo> {
    let data_type = read_data_type(reader)?;
    let array_dimension = reader.read_u32()?;
    let number_of_values = reader.read_u64()?;
    let total_size_bytes = if has_total_size { reader.read_u64()? } else { 0 };

    Ok(ObjectRawInfo::new(path, data_type, number_of_values)
        .with_dimension(array_dimension)
        .with_total_size(total_size_bytes))
}

fn read_daqmx_info<S: ByteSource + ?Sized>(
    reader: &mut SegmentReader<'_, S>,
    path: &str,
    kind: ScalerKind,
) -> Result<ObjectRawInfo> {
    let data_type = read_data_type(reader)?;
    let array_dimension = reader.read_u32()?;
    let chunk_size = reader.read_u64()?;
    let daqmx = DaqMxMetadata::read(reader, kind)?;

    let mut info = ObjectRawInfo::new(path, data_type, chunk_size).with_dimension(array_dimension);
    info.daqmx = Some(daqmx);
    Ok(info)
}

impl ObjectMetadata {
    pub fn emit(&self, sink: &mut dyn StructureSink) -> Result<()> {
        sink.enter("object")?;
        sink.add("index", self.index)?;
        sink.add("object_path", &self.path)?;
        sink.add("raw_data_index", self.raw_data_index_code)?;

        if let RawDataIndex::New(info) = &self.raw_data_index {
            match &info.daqmx {
                Some(daqmx) => {
                    sink.enter("daqmx")?;
                    sink.add("type", daqmx.kind.description())?;
                    emit_type(info.data_type, sink)?;
                    sink.add("array_dimension", info.array_dimension)?;
                    sink.add("chunk_size", info.number_of_values)?;
                    daqmx.emit(sink)?;
                    sink.leave()?;
                }
                None => {
                    sink.enter("raw")?;
                    emit_type(info.data_type, sink)?;
                    sink.add("array_dimension", info.array_dimension)?;
                    sink.add("number_of_values", info.number_of_values)?;
                    if self.raw_data_index_code == RawDataIndex::WITH_TOTAL_SIZE {
                        sink.add("total_size_in_byte", info.total_size_bytes)?;
                    }
                    sink.leave()?;
                }
            }
        }

        sink.add("properties_count", self.properties.len())?;
        sink.enter("properties")?;
        for property in &self.properties {
            property.emit(sink)?;
        }
        sink.leave()?;

        sink.leave()
    }
}

fn emit_type(data_type: DataType, sink: &mut dyn StructureSink) -> Result<()> {
    sink.add("data_type", data_type.code())?;
    sink.add("data_type_string", data_type.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Node, TreeSink, Value};
    use crate::source::SliceSource;
    use crate::types::PropertyValue;
    use byteorder::{LittleEndian, WriteBytesExt};

    struct ObjectBytes(Vec<u8>);

    impl ObjectBytes {
        fn new(path: &str, raw_index: u32) -> Self {
            let mut bytes = Vec::new();
            bytes.write_u32::<LittleEndian>(path.len() as u32).unwrap();
            bytes.extend_from_slice(path.as_bytes());
            bytes.write_u32::<LittleEndian>(raw_index).unwrap();
            ObjectBytes(bytes)
        }

        fn u32(mut self, v: u32) -> Self {
            self.0.write_u32::<LittleEndian>(v).unwrap();
            self
        }

        fn u64(mut self, v: u64) -> Self {
            self.0.write_u64::<LittleEndian>(v).unwrap();
            self
        }

        fn no_properties(self) -> Vec<u8> {
            self.u32(0).0
        }
    }

    fn decode(bytes: Vec<u8>, maps: &mut RawInfoMaps) -> Result<ObjectMetadata> {
        let mut source = SliceSource::new(bytes);
        let mut reader = SegmentReader::new(&mut source, false);
        read_object(&mut reader, maps, 0)
    }

    #[test]
    fn test_no_raw_data() {
        let mut maps = RawInfoMaps::new();
        let object = decode(ObjectBytes::new("/", RawDataIndex::NO_RAW_DATA).no_properties(), &mut maps).unwrap();
        assert_eq!(object.raw_data_index, RawDataIndex::NoRawData);
        assert!(maps.current().is_empty());
        assert!(maps.all().is_empty());
    }

    #[test]
    fn test_standard_index_defines_channel() {
        let mut maps = RawInfoMaps::new();
        let bytes = ObjectBytes::new("/'g'/'c'", 0x14).u32(3).u32(1).u64(100).no_properties();
        let object = decode(bytes, &mut maps).unwrap();

        let info = object.raw_data_index.raw_info().unwrap();
        assert_eq!(info.data_type, DataType::I32);
        assert_eq!(info.number_of_values, 100);
        assert_eq!(info.total_size_bytes, 0);
        assert_eq!(maps.current()["/'g'/'c'"], *info);
        assert_eq!(maps.all()["/'g'/'c'"], *info);
    }

    #[test]
    fn test_string_index_reads_total_size() {
        let mut maps = RawInfoMaps::new();
        let bytes = ObjectBytes::new("/'g'/'s'", 0x1c).u32(0x20).u32(1).u64(3).u64(27).no_properties();
        let object = decode(bytes, &mut maps).unwrap();
        assert_eq!(object.raw_data_index.raw_info().unwrap().total_size_bytes, 27);
    }

    #[test]
    fn test_inherit_without_definition_fails() {
        let mut maps = RawInfoMaps::new();
        let err = decode(ObjectBytes::new("/'g'/'c'", 0).no_properties(), &mut maps).unwrap_err();
        assert!(matches!(err, TdmsError::MissingInheritedDescriptor(ref p) if p == "/'g'/'c'"));
    }

    #[test]
    fn test_inherit_resolves_previous() {
        let mut maps = RawInfoMaps::new();
        maps.define(ObjectRawInfo::new("/'g'/'c'", DataType::U16, 8).with_dimension(1));
        maps.start_new_object_list();

        let object = decode(ObjectBytes::new("/'g'/'c'", 0).no_properties(), &mut maps).unwrap();
        match object.raw_data_index {
            RawDataIndex::MatchesPrevious(info) => assert_eq!(info.data_type, DataType::U16),
            other => panic!("expected MatchesPrevious, got {:?}", other),
        }
        assert_eq!(maps.current().len(), 1);
    }

    #[test]
    fn test_unsupported_raw_index() {
        let mut maps = RawInfoMaps::new();
        let err = decode(ObjectBytes::new("/'g'/'c'", 0x18).no_properties(), &mut maps).unwrap_err();
        assert!(matches!(err, TdmsError::UnsupportedRawIndexMode { index: 0x18, .. }));
    }

    #[test]
    fn test_unknown_raw_type() {
        let mut maps = RawInfoMaps::new();
        let bytes = ObjectBytes::new("/'g'/'c'", 0x14).u32(0x77).u32(1).u64(1).no_properties();
        assert!(matches!(decode(bytes, &mut maps), Err(TdmsError::UnknownDataType(0x77))));
    }

    #[test]
    fn test_daqmx_index() {
        let mut maps = RawInfoMaps::new();
        let bytes = ObjectBytes::new("/'g'/'d'", 0x1269)
            .u32(0xFFFFFFFF) // data type
            .u32(1) // dimension
            .u64(50) // chunk size
            .u32(1) // scaler count
            .u32(3).u32(0).u32(0).u32(0).u32(1) // scaler
            .u32(1) // width count
            .u32(2) // width
            .no_properties();
        let object = decode(bytes, &mut maps).unwrap();

        let info = object.raw_data_index.raw_info().unwrap();
        assert_eq!(info.data_type, DataType::DAQmxRawData);
        assert_eq!(info.number_of_values, 50);
        let daqmx = info.daqmx.as_ref().unwrap();
        assert_eq!(daqmx.kind, ScalerKind::FormatChanging);
        assert_eq!(daqmx.raw_data_widths.as_slice(), &[2]);
        assert!(maps.all().contains_key("/'g'/'d'"));

        let mut sink = TreeSink::new();
        object.emit(&mut sink).unwrap();
        let node = sink.into_root().unwrap();
        assert_eq!(node.find("daqmx/chunk_size").and_then(Node::value), Some(&Value::U64(50)));
        assert_eq!(
            node.find("daqmx/format_changing_scalers/format_changing_scaler/data_type_string")
                .and_then(Node::value)
                .and_then(Value::as_str),
            Some("I16")
        );
    }

    #[test]
    fn test_digital_line_index_reports_bit_offset() {
        let mut maps = RawInfoMaps::new();
        let bytes = ObjectBytes::new("/'g'/'line3'", 0x1369)
            .u32(0xFFFFFFFF)
            .u32(1)
            .u64(8)
            .u32(1)
            .u32(0).u32(0).u32(19).u32(0).u32(0)
            .u32(1)
            .u32(4)
            .no_properties();
        let object = decode(bytes, &mut maps).unwrap();

        let info = object.raw_data_index.raw_info().unwrap();
        assert_eq!(info.daqmx.as_ref().unwrap().kind, ScalerKind::DigitalLine);

        let mut sink = TreeSink::new();
        object.emit(&mut sink).unwrap();
        let node = sink.into_root().unwrap();
        let scaler = node.find("daqmx/format_changing_scalers/format_changing_scaler").unwrap();
        assert_eq!(scaler.leaf("bit_offset_within_the_stride").and_then(Value::as_u64), Some(19));
        assert_eq!(scaler.leaf("byte_offset_within_the_stride").and_then(Value::as_u64), Some(2));
    }

    #[test]
    fn test_properties_follow_raw_index() {
        let mut maps = RawInfoMaps::new();
        let mut bytes = ObjectBytes::new("/'g'", RawDataIndex::NO_RAW_DATA).u32(1).0;
        bytes.write_u32::<LittleEndian>(4).unwrap();
        bytes.extend_from_slice(b"unit");
        bytes.write_u32::<LittleEndian>(0x20).unwrap();
        bytes.write_u32::<LittleEndian>(1).unwrap();
        bytes.extend_from_slice(b"V");

        let object = decode(bytes, &mut maps).unwrap();
        assert_eq!(object.properties, vec![Property::new("unit", PropertyValue::String("V".into()))]);
    }
}
