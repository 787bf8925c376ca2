use bytes::BytesMut;

use crate::packet::{PacketError, Result, frame::peek_frame_length, frame_packet};

pub const SERVERBOUND_REQUEST_ID: u32 = 0x00;

/// The only accepted encoding of a status request: length 1, packet id 0.
pub const STATUS_REQUEST_BYTES: [u8; 2] = [0x01, 0x00];

/// The empty status request, `[0x01, 0x00]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerBoundRequest;

impl ServerBoundRequest {
    pub fn new() -> Self {
        ServerBoundRequest
    }

    /// Matches the start of `buf` against [`STATUS_REQUEST_BYTES`].
    ///
    /// Returns `Ok(None)` while the bytes seen so far are a prefix of the
    /// request. Any other byte fails at once, including a length of 1
    /// written with a padded VarInt.
    pub fn try_read(buf: &[u8]) -> Result<Option<Self>> {
        let Some(&first) = buf.first() else {
            return Ok(None);
        };

        if first != STATUS_REQUEST_BYTES[0] {
            let length = match peek_frame_length(buf) {
                Ok(Some((length, _))) => length,
                _ => u32::from(first & 0x7f),
            };
            return Err(PacketError::MalformedStatusRequest { length });
        }

        match buf.get(1) {
            None => Ok(None),
            Some(&id) if id == STATUS_REQUEST_BYTES[1] => Ok(Some(ServerBoundRequest)),
            Some(_) => Err(PacketError::MalformedStatusRequest { length: 1 }),
        }
    }

    pub fn to_frame(&self) -> Result<BytesMut> {
        frame_packet(SERVERBOUND_REQUEST_ID, &[])
    }
}
