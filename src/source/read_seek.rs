// src/source/read_seek.rs
use crate::error::{TdmsError, Result};
use crate::source::ByteSource;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Buffered file access
pub type FileSource = ReadSeekSource<BufReader<File>>;

/// Byte source over any seekable stream
pub struct ReadSeekSource<R: Read + Seek> {
    inner: R,
    size: u64,
    position: u64,
}

impl ReadSeekSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::with_capacity(65536, file))
    }
}

impl<R: Read + Seek> ReadSeekSource<R> {
    /// Wrap a stream; its size is taken once, up front
    pub fn new(mut inner: R) -> Result<Self> {
        let size = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(ReadSeekSource { inner, size, position: 0 })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ByteSource for ReadSeekSource<R> {
    fn size(&self) -> u64 {
        self.size
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn seek(&mut self, offset: u64) -> Result<()> {
        if offset != self.position {
            self.inner.seek(SeekFrom::Start(offset))?;
            self.position = offset;
        }
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let available = self.remaining();
        let truncated = TdmsError::TruncatedRead {
            offset: self.position,
            requested: buf.len(),
            available,
        };
        if buf.len() as u64 > available {
            return Err(truncated);
        }

        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(truncated),
            Err(e) => Err(e.into()),
        }
    }
}
