// src/lib.rs
//! # tdms-dump
//!
//! Decodes the segment and metadata structure of TDMS (Technical Data
//! Management Streaming) files, the native file format of National
//! Instruments LabVIEW, and reports everything it finds as a hierarchy:
//! segment lead-ins, table of contents flags, object lists, raw data indices
//! (including DAQmx scalers), typed properties, and the chunk layout of each
//! segment's raw data.
//!
//! Sample values are never read; only the metadata describing where raw data
//! lives and how much of it there is.
//!
//! ## Quick Start
//!
//! ### Dumping a file as XML
//!
//! ```rust,no_run
//! use tdms_dump::*;
//! use std::fs::File;
//! use std::io::BufWriter;
//!
//! fn main() -> Result<()> {
//!     let output = BufWriter::new(File::create("input.tdms.structure.xml")?);
//!     let mut sink = XmlSink::new(output)?;
//!     let summary = dump_file("input.tdms", &mut sink)?;
//!     sink.finish()?;
//!
//!     println!("{} segments", summary.segments.len());
//!     Ok(())
//! }
//! ```
//!
//! ### Walking segments directly
//!
//! ```rust,no_run
//! use tdms_dump::*;
//!
//! fn main() -> Result<()> {
//!     let mut walker = SegmentWalker::new(FileSource::open("input.tdms")?);
//!     let mut sink = TreeSink::new();
//!     while let Some(segment) = walker.next_segment(&mut sink)? {
//!         if let Some(layout) = &segment.layout {
//!             for channel in &layout.channels {
//!                 println!("{}: {} values", channel.path, channel.values_in_segment);
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Modules
pub mod error;
pub mod types;
pub mod metadata;
pub mod segment;
pub mod reader;
pub mod sink;
pub mod source;

mod dump;

// Re-export commonly used types at the crate root for convenience
pub use error::{TdmsError, Result};

// Type exports
pub use types::{
    DataType,
    TocFlags,
    Timestamp,
    Property,
    PropertyValue,
};

// Metadata exports
pub use metadata::{
    ObjectMetadata,
    ObjectRawInfo,
    RawDataIndex,
    RawInfoMaps,
};

// Segment exports
pub use segment::{
    ChannelLayout,
    ChunkLayout,
    SegmentHeader,
    SegmentInfo,
    SegmentWalker,
    WalkSummary,
};

// Sink exports
pub use sink::{Node, StructureSink, StructureSinkExt, TreeSink, Value, XmlOptions, XmlSink};

// Source exports
pub use source::{ByteSource, FileSource, ReadSeekSource, SliceSource};

#[cfg(feature = "mmap")]
pub use source::MmapSource;

pub use dump::{default_output_path, dump_file, dump_structure, DEFAULT_OUTPUT_SUFFIX};

// Version information
/// The version of the TDMS format this library decodes
pub const TDMS_VERSION: u32 = 4713;

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
