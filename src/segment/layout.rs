// src/segment/layout.rs
use crate::error::Result;
use crate::metadata::ObjectRawInfo;
use crate::segment::SegmentHeader;
use crate::sink::{StructureSink, StructureSinkExt};
use crate::types::DataType;

/// Raw data bookkeeping for one channel in one segment
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelLayout {
    pub path: String,
    pub data_type: DataType,
    pub array_dimension: u32,
    pub values_per_chunk: u64,
    pub bytes_per_chunk: u64,
    pub values_in_segment: u64,
}

/// How a segment's raw data region divides into chunks
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkLayout {
    /// Absolute offset of the raw data
    pub raw_data_start: u64,
    /// Absolute offset one past the raw data
    pub raw_data_end: u64,
    pub interleaved: bool,
    /// Bytes of one chunk across all channels
    pub chunk_size: u64,
    /// Bytes available for raw data in the segment
    pub total_chunk_bytes: u64,
    pub number_of_chunks: u64,
    pub channels: Vec<ChannelLayout>,
}

impl ChunkLayout {
    /// Lay out `channels` in the raw data region of a segment.
    ///
    /// `next_segment_offset` must already have the end-of-file marker
    /// resolved. A zero chunk size gives exactly one chunk.
    pub fn compute<'a>(
        header: &SegmentHeader,
        next_segment_offset: u64,
        channels: impl IntoIterator<Item = &'a ObjectRawInfo>,
    ) -> Self {
        let channels: Vec<&ObjectRawInfo> = channels.into_iter().collect();

        let chunk_size = channels
            .iter()
            .fold(0u64, |sum, info| sum.saturating_add(info.chunk_bytes()));
        let total_chunk_bytes = next_segment_offset.saturating_sub(header.raw_data_offset);
        let number_of_chunks = if chunk_size != 0 { total_chunk_bytes / chunk_size } else { 1 };

        let segment_start = header.segment_start();
        ChunkLayout {
            raw_data_start: segment_start.saturating_add(header.raw_data_offset),
            raw_data_end: segment_start.saturating_add(next_segment_offset),
            interleaved: header.toc.is_interleaved(),
            chunk_size,
            total_chunk_bytes,
            number_of_chunks,
            channels: channels
                .into_iter()
                .map(|info| ChannelLayout {
                    path: info.path.clone(),
                    data_type: info.data_type,
                    array_dimension: info.array_dimension,
                    values_per_chunk: info.number_of_values,
                    bytes_per_chunk: info.chunk_bytes(),
                    values_in_segment: info.number_of_values.saturating_mul(number_of_chunks),
                })
                .collect(),
        }
    }

    pub fn emit(&self, sink: &mut dyn StructureSink) -> Result<()> {
        sink.enter("channel_data")?;
        sink.add("absolute_raw_data_byte_start", self.raw_data_start)?;
        sink.add("absolute_raw_data_byte_end", self.raw_data_end)?;
        sink.add("interleaved", self.interleaved)?;
        sink.add("raw_data_size_of_one_chunk", self.chunk_size)?;
        sink.add("number_of_chunks", self.number_of_chunks)?;
        sink.add("channels_count", self.channels.len())?;
        sink.enter("channels")?;
        for channel in &self.channels {
            sink.enter("channel")?;
            sink.add("path", &channel.path)?;
            sink.add("data_type", channel.data_type.code())?;
            sink.add("data_type_string", channel.data_type.name())?;
            sink.add("data_type_single_value_size", channel.data_type.fixed_size().unwrap_or(0))?;
            sink.add("number_of_values_in_chunk", channel.values_per_chunk)?;
            sink.add("number_of_values_in_segment", channel.values_in_segment)?;
            sink.leave()?;
        }
        sink.leave()?;
        sink.leave()
    }
}
