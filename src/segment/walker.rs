// src/segment/walker.rs
use crate::error::Result;
use crate::metadata::{read_object_list, ObjectMetadata, RawInfoMaps};
use crate::reader::SegmentReader;
use crate::segment::{ChunkLayout, SegmentHeader};
use crate::sink::{StructureSink, StructureSinkExt};
use crate::source::ByteSource;
use log::{debug, warn};

/// Everything decoded from one segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInfo {
    pub index: u64,
    pub header: SegmentHeader,
    /// Next segment offset with the end-of-file marker resolved
    pub next_segment_offset: u64,
    pub raw_data_absolute_offset: u64,
    pub next_segment_absolute_offset: u64,
    /// Objects listed in this segment's metadata, in file order
    pub objects: Vec<ObjectMetadata>,
    /// Present when any channel has raw data active in this segment
    pub layout: Option<ChunkLayout>,
}

/// Result of a complete pass over a file
#[derive(Debug, Clone, PartialEq)]
pub struct WalkSummary {
    pub file_size: u64,
    pub segments: Vec<SegmentInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    AtOffset(u64),
    Done,
}

/// Visits the segments of a file in order, from offset 0 to the end.
///
/// Raw data layouts accumulate across segments, so segments can only be
/// decoded in file order. The first error ends the walk.
pub struct SegmentWalker<S: ByteSource> {
    source: S,
    maps: RawInfoMaps,
    state: WalkState,
    index: u64,
}

impl<S: ByteSource> SegmentWalker<S> {
    pub fn new(source: S) -> Self {
        SegmentWalker {
            source,
            maps: RawInfoMaps::new(),
            state: WalkState::AtOffset(0),
            index: 0,
        }
    }

    pub fn file_size(&self) -> u64 {
        self.source.size()
    }

    /// Raw data layouts known so far
    pub fn maps(&self) -> &RawInfoMaps {
        &self.maps
    }

    pub fn is_done(&self) -> bool {
        self.state == WalkState::Done
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Walk every remaining segment inside a `segments` node
    pub fn walk(&mut self, sink: &mut dyn StructureSink) -> Result<WalkSummary> {
        sink.enter("segments")?;
        let mut segments = Vec::new();
        while let Some(segment) = self.next_segment(sink)? {
            segments.push(segment);
        }
        sink.leave()?;

        Ok(WalkSummary {
            file_size: self.file_size(),
            segments,
        })
    }

    /// Decode and emit the segment at the current offset.
    ///
    /// Returns `None` once the end of the file is reached. After an error the
    /// walker is done and will not advance.
    pub fn next_segment(&mut self, sink: &mut dyn StructureSink) -> Result<Option<SegmentInfo>> {
        let offset = match self.state {
            WalkState::AtOffset(offset) => offset,
            WalkState::Done => return Ok(None),
        };
        self.state = WalkState::Done;

        let file_size = self.source.size();
        if offset == file_size {
            return Ok(None);
        }

        let header = SegmentHeader::read(&mut self.source, offset)?;
        let segment_start = header.segment_start();
        let next_segment_offset = header.resolved_next_segment_offset(file_size);
        let next_segment_absolute_offset = segment_start.checked_add(next_segment_offset);
        let raw_data_absolute_offset = segment_start.saturating_add(header.raw_data_offset);

        debug!(
            "segment {} at {}: toc {:#x}, next offset {}, raw data offset {}",
            self.index,
            offset,
            header.toc.raw_value(),
            next_segment_offset,
            header.raw_data_offset
        );

        sink.enter("segment")?;
        sink.add("index", self.index)?;
        header.emit(sink)?;
        sink.add("absolute_segment_offset", offset)?;
        sink.add("absolute_raw_data_offset", raw_data_absolute_offset)?;
        sink.add("absolute_next_segment_offset", next_segment_absolute_offset.unwrap_or(u64::MAX))?;

        if header.toc.has_new_obj_list() {
            self.maps.start_new_object_list();
        }

        // A segment without metadata has a raw data offset of 0
        let objects = if header.raw_data_offset > 0 {
            if !header.toc.has_metadata() {
                warn!("segment {} has a raw data offset but no metadata flag", self.index);
            }
            let mut reader = SegmentReader::new(&mut self.source, header.toc.is_big_endian());
            read_object_list(&mut reader, &mut self.maps, sink)?
        } else {
            Vec::new()
        };

        let layout = if self.maps.current().is_empty() {
            None
        } else {
            let layout = ChunkLayout::compute(&header, next_segment_offset, self.maps.current().values());
            debug!(
                "segment {}: {} channel(s), chunk size {}, {} chunk(s)",
                self.index,
                layout.channels.len(),
                layout.chunk_size,
                layout.number_of_chunks
            );
            layout.emit(sink)?;
            Some(layout)
        };

        sink.leave()?;

        match next_segment_absolute_offset {
            Some(next) if next <= file_size => self.state = WalkState::AtOffset(next),
            _ => warn!(
                "segment {} at {} points past the end of the file ({} bytes); stopping",
                self.index, offset, file_size
            ),
        }

        let info = SegmentInfo {
            index: self.index,
            next_segment_offset,
            raw_data_absolute_offset,
            next_segment_absolute_offset: next_segment_absolute_offset.unwrap_or(u64::MAX),
            header,
            objects,
            layout,
        };
        self.index += 1;
        Ok(Some(info))
    }
}
