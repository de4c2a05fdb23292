// src/reader/segment_reader.rs
use crate::error::{TdmsError, Result};
use crate::source::ByteSource;
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Reads values from one segment, applying that segment's byte order.
///
/// The byte order is fixed at construction from the segment's table of
/// contents. Numbers are decoded with `byteorder`; opaque blobs (extended
/// float, fixed point) are reversed as a whole when the segment order differs
/// from the host order.
pub struct SegmentReader<'a, S: ByteSource + ?Sized> {
    source: &'a mut S,
    big_endian: bool,
}

impl<'a, S: ByteSource + ?Sized> SegmentReader<'a, S> {
    pub fn new(source: &'a mut S, big_endian: bool) -> Self {
        SegmentReader { source, big_endian }
    }

    pub fn is_big_endian(&self) -> bool {
        self.big_endian
    }

    /// Absolute offset of the next byte to be read
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.source.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_ordered<T, const N: usize>(&mut self, le: fn(&[u8]) -> T, be: fn(&[u8]) -> T) -> Result<T> {
        let buf = self.read_array::<N>()?;
        Ok(if self.big_endian { be(&buf) } else { le(&buf) })
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_ordered::<_, 2>(LittleEndian::read_u16, BigEndian::read_u16)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_ordered::<_, 2>(LittleEndian::read_i16, BigEndian::read_i16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_ordered::<_, 4>(LittleEndian::read_u32, BigEndian::read_u32)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_ordered::<_, 4>(LittleEndian::read_i32, BigEndian::read_i32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_ordered::<_, 8>(LittleEndian::read_u64, BigEndian::read_u64)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_ordered::<_, 8>(LittleEndian::read_i64, BigEndian::read_i64)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_ordered::<_, 4>(LittleEndian::read_f32, BigEndian::read_f32)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_ordered::<_, 8>(LittleEndian::read_f64, BigEndian::read_f64)
    }

    /// Read an opaque fixed-size value, in host byte order
    pub fn read_blob<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = self.read_array::<N>()?;
        if cfg!(target_endian = "big") != self.big_endian {
            buf.reverse();
        }
        Ok(buf)
    }

    /// Read a u32 byte count followed by that many bytes of UTF-8
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_u32()?;
        if length == 0 {
            return Ok(String::new());
        }

        let offset = self.source.position();
        let available = self.source.remaining();
        if u64::from(length) > available {
            return Err(TdmsError::TruncatedRead {
                offset,
                requested: length as usize,
                available,
            });
        }

        let mut bytes = vec![0u8; length as usize];
        self.source.read_exact(&mut bytes)?;
        String::from_utf8(bytes).map_err(|_| TdmsError::InvalidUtf8 { offset })
    }
}
