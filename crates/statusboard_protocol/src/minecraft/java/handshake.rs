use bytes::BytesMut;

use crate::packet::{Frame, PacketError, PacketReader, PacketWriter, Result, frame_packet};
use crate::types::VarInt;

pub const SERVERBOUND_HANDSHAKE_ID: u32 = 0x00;

const SEPARATOR_FORGE: &str = "\0";
const SEPARATOR_REAL_IP: &str = "///";

/// The state a client asks to switch to after the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextState {
    Status = 1,
    Login = 2,
    Transfer = 3,
}

impl TryFrom<u32> for NextState {
    type Error = PacketError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Self::Status),
            2 => Ok(Self::Login),
            3 => Ok(Self::Transfer),
            _ => Err(PacketError::UnsupportedNextState(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBoundHandshake {
    pub protocol_version: VarInt,
    pub server_address: String,
    pub server_port: u16,
    pub next_state: VarInt,
}

impl ServerBoundHandshake {
    pub fn new(
        protocol_version: u32,
        server_address: impl Into<String>,
        server_port: u16,
        next_state: u32,
    ) -> Self {
        Self {
            protocol_version: VarInt(protocol_version),
            server_address: server_address.into(),
            server_port,
            next_state: VarInt(next_state),
        }
    }

    pub fn next_state(&self) -> Result<NextState> {
        NextState::try_from(self.next_state.0)
    }

    /// The host the client typed, without Forge markers or forwarded-IP data.
    pub fn parse_server_address(&self) -> &str {
        let addr = self.server_address.as_str();
        let addr = match addr.find(SEPARATOR_FORGE) {
            Some(idx) => &addr[..idx],
            None => addr,
        };
        let addr = match addr.find(SEPARATOR_REAL_IP) {
            Some(idx) => &addr[..idx],
            None => addr,
        };
        addr.trim_matches('.')
    }

    /// Reads the handshake fields from a packet payload.
    pub fn read_from(reader: &mut PacketReader<'_>) -> Result<Self> {
        let protocol_version = reader.read_varint()?;
        let server_address = reader.read_string()?.to_owned();
        let server_port = reader.read_u16_be()?;
        let next_state = reader.read_varint()?;

        Ok(Self {
            protocol_version: VarInt(protocol_version),
            server_address,
            server_port,
            next_state: VarInt(next_state),
        })
    }

    /// Decodes a handshake from a complete frame. Trailing bytes are rejected.
    pub fn from_frame(frame: &Frame<'_>, max_string_length: usize) -> Result<Self> {
        if frame.id != SERVERBOUND_HANDSHAKE_ID {
            return Err(PacketError::UnexpectedPacketId {
                expected: SERVERBOUND_HANDSHAKE_ID,
                actual: frame.id,
            });
        }

        let mut reader = frame
            .payload_reader()
            .with_max_string_length(max_string_length);
        let handshake = Self::read_from(&mut reader)?;
        reader.finish()?;
        Ok(handshake)
    }

    pub fn write_to(&self, writer: &mut PacketWriter) -> Result<usize> {
        let mut written = 0;
        written += writer.write_varint(self.protocol_version.0);
        written += writer.write_string(&self.server_address)?;
        written += writer.write_u16_be(self.server_port);
        written += writer.write_varint(self.next_state.0);
        Ok(written)
    }

    /// Encodes this handshake as a complete frame.
    pub fn to_frame(&self) -> Result<BytesMut> {
        let mut writer = PacketWriter::new();
        self.write_to(&mut writer)?;
        frame_packet(SERVERBOUND_HANDSHAKE_ID, writer.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::{reader::DEFAULT_MAX_STRING_LENGTH, try_read_frame};

    const LOCALHOST_STATUS: [u8; 17] = [
        0x10, 0x00, 0xc2, 0x04, 0x09, b'l', b'o', b'c', b'a', b'l', b'h', b'o', b's', b't',
        0x63, 0xdd, 0x01,
    ];

    fn parse(bytes: &[u8]) -> Result<ServerBoundHandshake> {
        let frame = try_read_frame(bytes, 4096)?.expect("complete frame");
        ServerBoundHandshake::from_frame(&frame, DEFAULT_MAX_STRING_LENGTH)
    }

    #[test]
    fn test_parse_status_handshake() {
        let handshake = parse(&LOCALHOST_STATUS).unwrap();

        assert_eq!(handshake.protocol_version.0, 578);
        assert_eq!(handshake.server_address, "localhost");
        assert_eq!(handshake.server_port, 25565);
        assert_eq!(handshake.next_state().unwrap(), NextState::Status);
    }

    #[test]
    fn test_reencode_reproduces_frame() {
        let handshake = parse(&LOCALHOST_STATUS).unwrap();
        let encoded = handshake.to_frame().unwrap();
        assert_eq!(&encoded[..], &LOCALHOST_STATUS[..]);
    }

    #[test]
    fn test_wrong_packet_id() {
        let mut bytes = LOCALHOST_STATUS;
        bytes[1] = 0x01;
        assert!(matches!(
            parse(&bytes),
            Err(PacketError::UnexpectedPacketId {
                expected: 0x00,
                actual: 0x01
            })
        ));
    }

    #[test]
    fn test_address_length_past_frame_end() {
        let mut bytes = LOCALHOST_STATUS;
        bytes[4] = 0x0f;
        assert!(matches!(
            parse(&bytes),
            Err(PacketError::BufferUnderrun { .. })
        ));
    }

    #[test]
    fn test_truncated_port() {
        let mut writer = PacketWriter::new();
        writer.write_varint(578);
        writer.write_string("a").unwrap();
        writer.write_raw(&[0x63]);
        let framed = frame_packet(SERVERBOUND_HANDSHAKE_ID, writer.as_slice()).unwrap();

        assert!(matches!(
            parse(&framed),
            Err(PacketError::BufferUnderrun {
                needed: 2,
                remaining: 1
            })
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut writer = PacketWriter::new();
        ServerBoundHandshake::new(578, "localhost", 25565, 1)
            .write_to(&mut writer)
            .unwrap();
        writer.write_raw(&[0x00]);
        let framed = frame_packet(SERVERBOUND_HANDSHAKE_ID, writer.as_slice()).unwrap();

        assert!(matches!(parse(&framed), Err(PacketError::TrailingBytes(1))));
    }

    #[test]
    fn test_next_state_values() {
        assert_eq!(NextState::try_from(2).unwrap(), NextState::Login);
        assert_eq!(NextState::try_from(3).unwrap(), NextState::Transfer);
        assert!(matches!(
            NextState::try_from(7),
            Err(PacketError::UnsupportedNextState(7))
        ));

        let login = ServerBoundHandshake::new(578, "localhost", 25565, 2);
        assert_eq!(login.next_state().unwrap(), NextState::Login);
    }

    #[test]
    fn test_parse_server_address_strips_markers() {
        let forge = ServerBoundHandshake::new(762, "play.example.com\0FML2\0", 25565, 1);
        assert_eq!(forge.parse_server_address(), "play.example.com");

        let real_ip = ServerBoundHandshake::new(
            762,
            "play.example.com.///192.168.1.1:12345///1234567890",
            25565,
            1,
        );
        assert_eq!(real_ip.parse_server_address(), "play.example.com");
    }
}
