use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::packet::{Frame, PacketError, PacketWriter, Result};
use crate::types::varint_len;

pub const CLIENTBOUND_RESPONSE_ID: u32 = 0x00;

/// Status response carrying an already-serialized JSON document.
///
/// The payload is embedded verbatim behind a VarInt length; it is neither
/// parsed nor validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoundResponse {
    pub json_response: Bytes,
}

impl ClientBoundResponse {
    pub fn new(json_response: impl Into<Bytes>) -> Self {
        Self {
            json_response: json_response.into(),
        }
    }

    pub fn write_to(&self, writer: &mut PacketWriter) -> Result<usize> {
        writer.write_prefixed_bytes(&self.json_response)
    }

    /// `packet_id || VarInt(json length) || json`, without the frame length.
    pub fn encode_body(&self) -> Result<BytesMut> {
        let json_len = self.json_response.len();
        let declared = checked_len(json_len)?;
        let mut writer = PacketWriter::with_capacity(
            varint_len(CLIENTBOUND_RESPONSE_ID) + varint_len(declared) + json_len,
        );
        writer.write_varint(CLIENTBOUND_RESPONSE_ID);
        self.write_to(&mut writer)?;
        Ok(writer.into_inner())
    }

    /// The complete frame as sent to the client.
    pub fn to_frame(&self) -> Result<BytesMut> {
        let body = self.encode_body()?;
        let declared = checked_len(body.len())?;

        let mut writer = PacketWriter::with_capacity(varint_len(declared) + body.len());
        writer.write_varint(declared);
        writer.write_raw(&body);
        Ok(writer.into_inner())
    }

    pub fn from_frame(frame: &Frame<'_>) -> Result<Self> {
        if frame.id != CLIENTBOUND_RESPONSE_ID {
            return Err(PacketError::UnexpectedPacketId {
                expected: CLIENTBOUND_RESPONSE_ID,
                actual: frame.id,
            });
        }

        let mut reader = frame.payload_reader().with_max_string_length(frame.length);
        let json = reader.read_string()?;
        reader.finish()?;
        Ok(Self::new(Bytes::copy_from_slice(json.as_bytes())))
    }
}

fn checked_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| PacketError::ValueTooLarge(len))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseJSON {
    pub version: VersionJSON,
    pub players: PlayersJSON,
    pub description: DescriptionJSON,
    #[serde(default)]
    pub favicon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionJSON {
    pub name: String,
    pub protocol: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayersJSON {
    pub max: i32,
    pub online: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionJSON {
    pub text: String,
}
