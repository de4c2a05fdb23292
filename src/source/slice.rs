// src/source/slice.rs
use crate::error::{TdmsError, Result};
use crate::source::ByteSource;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::fs::File;
#[cfg(feature = "mmap")]
use std::path::Path;

/// Byte source over a contiguous in-memory buffer
#[derive(Debug, Clone)]
pub struct SliceSource<T: AsRef<[u8]>> {
    data: T,
    position: u64,
}

/// Memory-mapped file access (requires "mmap" feature)
#[cfg(feature = "mmap")]
pub type MmapSource = SliceSource<Mmap>;

impl<T: AsRef<[u8]>> SliceSource<T> {
    pub fn new(data: T) -> Self {
        SliceSource { data, position: 0 }
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

#[cfg(feature = "mmap")]
impl SliceSource<Mmap> {
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        // The file must not be modified while mapped
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(SliceSource::new(mmap))
    }
}

impl<T: AsRef<[u8]>> ByteSource for SliceSource<T> {
    fn size(&self) -> u64 {
        self.data.as_ref().len() as u64
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn seek(&mut self, offset: u64) -> Result<()> {
        self.position = offset;
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let available = self.remaining();
        if buf.len() as u64 > available {
            return Err(TdmsError::TruncatedRead {
                offset: self.position,
                requested: buf.len(),
                available,
            });
        }

        let start = self.position as usize;
        buf.copy_from_slice(&self.data.as_ref()[start..start + buf.len()]);
        self.position += buf.len() as u64;
        Ok(())
    }
}
