// src/reader/mod.rs
mod segment_reader;

pub use segment_reader::SegmentReader;
