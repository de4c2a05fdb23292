// src/source/mod.rs
//! Positioned byte access for the segment walker.
//!
//! - [`ReadSeekSource`] - any `Read + Seek` stream, typically a buffered file
//! - [`SliceSource`] - an in-memory buffer (`Vec<u8>`, [`bytes::Bytes`], or a
//!   memory map with the `mmap` feature)
//!
//! Every source reports reads past its end as [`TdmsError::TruncatedRead`],
//! so callers never see a short read.
//!
//! [`TdmsError::TruncatedRead`]: crate::error::TdmsError::TruncatedRead

mod read_seek;
mod slice;

use crate::error::Result;

pub use read_seek::{FileSource, ReadSeekSource};
pub use slice::SliceSource;

#[cfg(feature = "mmap")]
pub use slice::MmapSource;

/// Random access over a fixed-size byte range
pub trait ByteSource {
    /// Total number of bytes in the source
    fn size(&self) -> u64;

    /// Current absolute read position
    fn position(&self) -> u64;

    /// Move the read position to an absolute offset
    fn seek(&mut self, offset: u64) -> Result<()>;

    /// Fill `buf` completely from the current position
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Bytes left between the current position and the end of the source
    fn remaining(&self) -> u64 {
        self.size().saturating_sub(self.position())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn size(&self) -> u64 {
        (**self).size()
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn seek(&mut self, offset: u64) -> Result<()> {
        (**self).seek(offset)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_exact(buf)
    }
}
