//! Packet framing.
//!
//! Every packet on the wire is `[VarInt length][VarInt packet_id][payload]`,
//! where `length` counts the packet id and the payload but not itself.
//! Socket reads do not line up with frames, so decoding works on whatever
//! has been buffered so far and reports `Ok(None)` until a whole frame is
//! available.

use bytes::BytesMut;

use super::{PacketError, PacketReader, PacketWriter, Result};
use crate::types::{decode_varint, varint_len};

/// Default upper bound for a declared frame length.
pub const DEFAULT_MAX_FRAME_LENGTH: usize = 4096;

/// A complete frame borrowed from a receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Declared length: packet id plus payload.
    pub length: usize,
    /// Size of the length prefix itself.
    pub header_len: usize,
    pub id: u32,
    pub payload: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Bytes this frame occupies in the buffer, prefix included.
    pub fn total_len(&self) -> usize {
        self.header_len + self.length
    }

    pub fn payload_reader(&self) -> PacketReader<'a> {
        PacketReader::new(self.payload)
    }
}

/// Decodes the length prefix at the start of `buf`.
///
/// Returns `Ok(None)` while the prefix itself is still incomplete.
pub fn peek_frame_length(buf: &[u8]) -> Result<Option<(u32, usize)>> {
    match decode_varint(buf, 0) {
        Ok(prefix) => Ok(Some(prefix)),
        Err(PacketError::UnexpectedEof) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Extracts the first frame from `buf` if it has fully arrived.
///
/// A declared length of zero or above `max_length` is rejected as soon as the
/// prefix is readable, without waiting for the body.
pub fn try_read_frame(buf: &[u8], max_length: usize) -> Result<Option<Frame<'_>>> {
    let Some((declared, header_len)) = peek_frame_length(buf)? else {
        return Ok(None);
    };

    if declared == 0 {
        return Err(PacketError::InvalidFrameLength(declared));
    }

    let length = declared as usize;
    if length > max_length {
        return Err(PacketError::FrameTooLong {
            length,
            max: max_length,
        });
    }

    if buf.len() - header_len < length {
        return Ok(None);
    }

    let data = &buf[header_len..header_len + length];
    let (id, id_len) = decode_varint(data, 0)?;

    Ok(Some(Frame {
        length,
        header_len,
        id,
        payload: &data[id_len..],
    }))
}

/// Wraps a packet body as `length || id || body`.
pub fn frame_packet(id: u32, body: &[u8]) -> Result<BytesMut> {
    let length = varint_len(id) + body.len();
    let declared = u32::try_from(length).map_err(|_| PacketError::ValueTooLarge(length))?;

    let mut writer = PacketWriter::with_capacity(varint_len(declared) + length);
    writer.write_varint(declared);
    writer.write_varint(id);
    writer.write_raw(body);
    Ok(writer.into_inner())
}
