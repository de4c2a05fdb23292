// src/dump.rs
use crate::error::Result;
use crate::segment::{SegmentWalker, WalkSummary};
use crate::sink::{StructureSink, StructureSinkExt};
use crate::source::{ByteSource, FileSource};
use log::info;
use std::path::Path;

/// Suffix appended to the input path when no output path is given
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".structure.xml";

/// Default output path for a TDMS file: the input path plus [`DEFAULT_OUTPUT_SUFFIX`]
pub fn default_output_path(tdms_path: impl AsRef<Path>) -> std::path::PathBuf {
    let mut path = tdms_path.as_ref().as_os_str().to_owned();
    path.push(DEFAULT_OUTPUT_SUFFIX);
    path.into()
}

/// Walk every segment of `source` inside a `file` node labelled with `file_path`
pub fn dump_structure<S: ByteSource>(
    source: S,
    file_path: &str,
    sink: &mut dyn StructureSink,
) -> Result<WalkSummary> {
    sink.enter("file")?;
    sink.add("filepath", file_path)?;
    sink.add("size_in_byte", source.size())?;

    let mut walker = SegmentWalker::new(source);
    let summary = walker.walk(sink)?;

    sink.add("segments_count", summary.segments.len())?;
    sink.leave()?;
    Ok(summary)
}

/// Open a TDMS file and dump its structure
pub fn dump_file(path: impl AsRef<Path>, sink: &mut dyn StructureSink) -> Result<WalkSummary> {
    let path = path.as_ref();
    let source = FileSource::open(path)?;
    let summary = dump_structure(source, &path.to_string_lossy(), sink)?;
    info!("{}: {} segment(s), {} bytes", path.display(), summary.segments.len(), summary.file_size);
    Ok(summary)
}
