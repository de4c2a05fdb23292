// src/metadata/mod.rs
mod daqmx;
mod decoder;
mod property;
mod raw_data_index;
mod raw_info;

pub use daqmx::{DaqMxMetadata, Scaler, ScalerKind, DIGITAL_LINE_SCALER, FORMAT_CHANGING_SCALER};
pub use decoder::{read_object, read_object_list, ObjectMetadata};
pub use property::{read_property, read_property_value};
pub use raw_data_index::{ObjectRawInfo, RawDataIndex};
pub use raw_info::RawInfoMaps;
