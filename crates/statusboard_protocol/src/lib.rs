//! Minecraft handshake and status protocol for statusboard
//!
//! This crate provides the wire codec for the Java Edition server list ping:
//! VarInt encoding, bounds-checked packet reading, packet writing, framing,
//! and the handshake and status packets.

pub mod minecraft;
pub mod packet;
pub mod types;
pub mod version;

// Re-export the most commonly used types
pub use minecraft::java::handshake::{NextState, ServerBoundHandshake};
pub use minecraft::java::status::clientbound_response::ClientBoundResponse;
pub use minecraft::java::status::serverbound_request::ServerBoundRequest;
pub use packet::{Frame, PacketError, PacketReader, PacketWriter};
pub use types::{VarInt, decode_varint, encode_varint};
pub use version::Version;
