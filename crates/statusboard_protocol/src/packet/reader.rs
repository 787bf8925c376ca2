use super::{PacketError, Result};
use crate::types::decode_varint;

/// Default cap on the byte length of a string field (255 characters of up
/// to 4 UTF-8 bytes each).
pub const DEFAULT_MAX_STRING_LENGTH: usize = 255 * 4;

/// Sequential field reader over the first `end` bytes of a buffer.
///
/// `end` is the number of bytes actually received and may be smaller than
/// the buffer itself. Every read checks the remaining length first and never
/// touches bytes at or past `end`.
#[derive(Debug, Clone)]
pub struct PacketReader<'a> {
    buf: &'a [u8],
    end: usize,
    offset: usize,
    max_string_length: usize,
}

impl<'a> PacketReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_end(buf, buf.len())
    }

    pub fn with_end(buf: &'a [u8], end: usize) -> Self {
        Self {
            buf,
            end: end.min(buf.len()),
            offset: 0,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }

    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = max;
        self
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.end - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(PacketError::BufferUnderrun { needed, remaining });
        }
        Ok(())
    }

    pub fn read_varint(&mut self) -> Result<u32> {
        self.ensure(1)?;
        let (value, n) = decode_varint(&self.buf[..self.end], self.offset)?;
        self.offset += n;
        Ok(value)
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let slice = &self.buf[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Reads a VarInt length followed by that many UTF-8 bytes.
    ///
    /// The declared length is checked against the configured maximum and the
    /// remaining input before any slicing. On failure the cursor is left where
    /// it was.
    pub fn read_string(&mut self) -> Result<&'a str> {
        let start = self.offset;
        let result = self.read_string_inner();
        if result.is_err() {
            self.offset = start;
        }
        result
    }

    fn read_string_inner(&mut self) -> Result<&'a str> {
        let length = self.read_varint()? as usize;
        if length > self.max_string_length {
            return Err(PacketError::StringTooLong {
                length,
                max: self.max_string_length,
            });
        }
        let bytes = self.read_bytes(length)?;
        Ok(std::str::from_utf8(bytes)?)
    }

    /// Fails unless every byte up to `end` has been consumed.
    pub fn finish(&self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(PacketError::TrailingBytes(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_handshake_fields() {
        let data = [
            0xc2, 0x04, 0x09, b'l', b'o', b'c', b'a', b'l', b'h', b'o', b's', b't', 0x63, 0xdd,
            0x01,
        ];
        let mut reader = PacketReader::new(&data);

        assert_eq!(reader.read_varint().unwrap(), 578);
        assert_eq!(reader.read_string().unwrap(), "localhost");
        assert_eq!(reader.read_u16_be().unwrap(), 25565);
        assert_eq!(reader.read_varint().unwrap(), 1);
        assert_eq!(reader.offset(), data.len());
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_end_limits_reads() {
        // Capacity is 8 but only 3 bytes were received.
        let buf = [0x01, 0x63, 0xdd, 0xaa, 0xbb, 0xcc, 0xdd, 0xee];
        let mut reader = PacketReader::with_end(&buf, 3);

        assert_eq!(reader.read_varint().unwrap(), 1);
        assert_eq!(reader.read_u16_be().unwrap(), 0x63dd);
        assert!(matches!(
            reader.read_varint(),
            Err(PacketError::BufferUnderrun {
                needed: 1,
                remaining: 0
            })
        ));
    }

    #[test]
    fn test_end_past_buffer_is_clamped() {
        let buf = [0x05];
        let mut reader = PacketReader::with_end(&buf, 64);
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.read_varint().unwrap(), 5);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_u16_underrun() {
        let mut reader = PacketReader::new(&[0x63]);
        assert!(matches!(
            reader.read_u16_be(),
            Err(PacketError::BufferUnderrun {
                needed: 2,
                remaining: 1
            })
        ));
    }

    #[test]
    fn test_varint_truncated_by_end() {
        let buf = [0x80, 0x01];
        let mut reader = PacketReader::with_end(&buf, 1);
        assert!(matches!(
            reader.read_varint(),
            Err(PacketError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_string_longer_than_remaining() {
        let data = [0x09, b'l', b'o', b'c'];
        let mut reader = PacketReader::new(&data);
        assert!(matches!(
            reader.read_string(),
            Err(PacketError::BufferUnderrun {
                needed: 9,
                remaining: 3
            })
        ));
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn test_string_over_configured_max() {
        let mut data = vec![0x10];
        data.extend_from_slice(&[b'a'; 16]);
        let mut reader = PacketReader::new(&data).with_max_string_length(8);
        assert!(matches!(
            reader.read_string(),
            Err(PacketError::StringTooLong { length: 16, max: 8 })
        ));
    }

    #[test]
    fn test_huge_declared_string_length() {
        let data = [0xff, 0xff, 0xff, 0xff, 0x0f];
        let mut reader = PacketReader::new(&data);
        assert!(matches!(
            reader.read_string(),
            Err(PacketError::StringTooLong { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let data = [0x02, 0xc3, 0x28];
        let mut reader = PacketReader::new(&data);
        assert!(matches!(
            reader.read_string(),
            Err(PacketError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_unicode_string() {
        let text = "Test string with unicode 🦀";
        let mut data = vec![text.len() as u8];
        data.extend_from_slice(text.as_bytes());
        let mut reader = PacketReader::new(&data);
        assert_eq!(reader.read_string().unwrap(), text);
    }

    #[test]
    fn test_trailing_bytes() {
        let data = [0x01, 0x02];
        let mut reader = PacketReader::new(&data);
        reader.read_varint().unwrap();
        assert!(matches!(reader.finish(), Err(PacketError::TrailingBytes(1))));
    }
}
