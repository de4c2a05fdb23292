// src/segment/mod.rs
mod header;
mod layout;
mod walker;

pub use header::SegmentHeader;
pub use layout::{ChannelLayout, ChunkLayout};
pub use walker::{SegmentInfo, SegmentWalker, WalkSummary};
