use byteorder::{ByteOrder, LittleEndian};

use crate::error::RecordError;

/// Bounds-checked, forward-only reader over a borrowed record buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read `len` bytes and advance. The cursor does not move on failure.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], RecordError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(RecordError::Truncated {
                needed: len,
                remaining,
                offset: self.position,
            });
        }
        let start = self.position;
        self.position += len;
        Ok(&self.bytes[start..self.position])
    }

    pub fn read_u16(&mut self) -> Result<u16, RecordError> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, RecordError> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, RecordError> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64, RecordError> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    pub fn read_f64(&mut self) -> Result<f64, RecordError> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// Reads a 16-bit length prefix followed by that many raw bytes.
    pub fn read_prefixed(&mut self) -> Result<&'a [u8], RecordError> {
        let len = self.read_u16()? as usize;
        self.take(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_scalars_in_order() {
        let mut data = Vec::new();
        data.extend_from_slice(&0x1234u16.to_le_bytes());
        data.extend_from_slice(&(-7i32).to_le_bytes());
        data.extend_from_slice(&1.5f64.to_le_bytes());

        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_i32().unwrap(), -7);
        assert_eq!(cursor.read_f64().unwrap(), 1.5);
        assert!(cursor.is_empty());
        assert_eq!(cursor.position(), 14);
    }

    #[test]
    fn short_read_reports_offset_and_leaves_cursor_in_place() {
        let data = [1u8, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        cursor.take(1).unwrap();

        let err = cursor.read_u32().unwrap_err();
        match err {
            RecordError::Truncated {
                needed,
                remaining,
                offset,
            } => {
                assert_eq!((needed, remaining, offset), (4, 2, 1));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn prefixed_payload_must_fit_the_buffer() {
        let data = [5u8, 0, b'a', b'b'];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_prefixed(),
            Err(RecordError::Truncated { needed: 5, .. })
        ));
    }
}
