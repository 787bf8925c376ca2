//! Packet framing, field reading and writing, and the errors they produce.

use std::{io, str::Utf8Error};
use thiserror::Error;

pub mod frame;
pub mod reader;
pub mod writer;

pub use frame::{Frame, frame_packet, try_read_frame};
pub use reader::PacketReader;
pub use writer::PacketWriter;

/// Error type for packet decoding, validation and encoding
#[derive(Error, Debug)]
pub enum PacketError {
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    #[error("Buffer underrun: needed {needed} bytes, {remaining} remaining")]
    BufferUnderrun { needed: usize, remaining: usize },

    #[error("VarInt too long (>5 bytes or wider than 32 bits)")]
    VarIntTooLong,

    #[error("Unexpected end of input while decoding VarInt")]
    UnexpectedEof,

    #[error("Invalid UTF-8 in string field: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    #[error("String too long: {length} bytes (max: {max})")]
    StringTooLong { length: usize, max: usize },

    #[error("Value too large for a VarInt length prefix: {0}")]
    ValueTooLarge(usize),

    #[error("Frame too long: {length} bytes (max: {max})")]
    FrameTooLong { length: usize, max: usize },

    #[error("Invalid frame length: {0}")]
    InvalidFrameLength(u32),

    #[error("Unexpected packet id: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedPacketId { expected: u32, actual: u32 },

    #[error("{0} trailing bytes after packet fields")]
    TrailingBytes(usize),

    #[error("Unsupported next state in handshake: {0}")]
    UnsupportedNextState(u32),

    #[error("Malformed status request (frame length {length})")]
    MalformedStatusRequest { length: u32 },
}

impl PacketError {
    /// Returns the kind of error, similar to how std::io::Error works
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            PacketError::Io(e) => e.kind(),
            PacketError::BufferUnderrun { .. } => io::ErrorKind::InvalidData,
            PacketError::VarIntTooLong => io::ErrorKind::InvalidData,
            PacketError::UnexpectedEof => io::ErrorKind::UnexpectedEof,
            PacketError::InvalidUtf8(_) => io::ErrorKind::InvalidData,
            PacketError::StringTooLong { .. } => io::ErrorKind::InvalidData,
            PacketError::ValueTooLarge(_) => io::ErrorKind::InvalidInput,
            PacketError::FrameTooLong { .. } => io::ErrorKind::InvalidData,
            PacketError::InvalidFrameLength(_) => io::ErrorKind::InvalidData,
            PacketError::UnexpectedPacketId { .. } => io::ErrorKind::InvalidData,
            PacketError::TrailingBytes(_) => io::ErrorKind::InvalidData,
            PacketError::UnsupportedNextState(_) => io::ErrorKind::Unsupported,
            PacketError::MalformedStatusRequest { .. } => io::ErrorKind::InvalidData,
        }
    }
}

impl From<PacketError> for io::Error {
    fn from(err: PacketError) -> Self {
        match err {
            PacketError::Io(e) => e,
            other => io::Error::new(other.kind(), other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PacketError>;
