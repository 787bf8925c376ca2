use bytes::{BufMut, BytesMut};

use super::{PacketError, Result};
use crate::types::encode_varint;

/// Appends fields to a growable buffer, producing an unframed packet body.
#[derive(Debug, Default, Clone)]
pub struct PacketWriter {
    buf: BytesMut,
}

impl PacketWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn write_varint(&mut self, value: u32) -> usize {
        encode_varint(value, &mut self.buf)
    }

    pub fn write_u16_be(&mut self, value: u16) -> usize {
        self.buf.put_u16(value);
        2
    }

    pub fn write_string(&mut self, value: &str) -> Result<usize> {
        self.write_prefixed_bytes(value.as_bytes())
    }

    /// Writes a VarInt length prefix followed by `bytes` verbatim.
    ///
    /// The content is not inspected, so callers can embed pre-encoded payloads
    /// such as serialized JSON.
    pub fn write_prefixed_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        let length =
            u32::try_from(bytes.len()).map_err(|_| PacketError::ValueTooLarge(bytes.len()))?;
        let written = self.write_varint(length);
        self.buf.extend_from_slice(bytes);
        Ok(written + bytes.len())
    }

    pub fn write_raw(&mut self, bytes: &[u8]) -> usize {
        self.buf.extend_from_slice(bytes);
        bytes.len()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> BytesMut {
        self.buf
    }
}
