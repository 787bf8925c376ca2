//! VarInt encoding used for every length and enum field on the wire.
//!
//! Each byte carries 7 value bits, least significant group first, and the
//! high bit is set on every byte except the last one. Values are capped at
//! 32 bits, so an encoding never exceeds [`MAX_VARINT_LEN`] bytes.

use bytes::BufMut;

use crate::packet::{PacketError, Result};

const SEGMENT_BITS: u8 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Maximum number of bytes a VarInt may occupy.
pub const MAX_VARINT_LEN: usize = 5;

/// Bit position of the last byte's payload. Only its low 4 bits fit in a u32.
const LAST_BYTE_SHIFT: u32 = 28;
const LAST_BYTE_MAX: u8 = 0x0F;

/// Decodes a VarInt starting at `offset` and returns the value together with
/// the number of bytes it occupied.
///
/// Fails with [`PacketError::UnexpectedEof`] when the input ends before a
/// terminating byte, and with [`PacketError::VarIntTooLong`] when the fifth
/// byte still has its continuation bit set or carries bits past bit 31.
pub fn decode_varint(bytes: &[u8], offset: usize) -> Result<(u32, usize)> {
    let mut value: u32 = 0;
    let mut position: u32 = 0;
    let mut cursor = offset;

    loop {
        let Some(&byte) = bytes.get(cursor) else {
            return Err(PacketError::UnexpectedEof);
        };
        cursor += 1;

        if position == LAST_BYTE_SHIFT
            && (byte & CONTINUE_BIT != 0 || byte & SEGMENT_BITS > LAST_BYTE_MAX)
        {
            return Err(PacketError::VarIntTooLong);
        }

        value |= u32::from(byte & SEGMENT_BITS) << position;

        if byte & CONTINUE_BIT == 0 {
            return Ok((value, cursor - offset));
        }

        position += 7;
    }
}

/// Appends the VarInt encoding of `value` to `out` and returns the number of
/// bytes written (1 to 5).
pub fn encode_varint<B: BufMut>(value: u32, out: &mut B) -> usize {
    let mut value = value;
    let mut bytes_written = 0;

    loop {
        let mut byte = (value & u32::from(SEGMENT_BITS)) as u8;
        value >>= 7;

        if value != 0 {
            byte |= CONTINUE_BIT;
        }

        out.put_u8(byte);
        bytes_written += 1;

        if value == 0 {
            return bytes_written;
        }
    }
}

/// Number of bytes [`encode_varint`] emits for `value`.
#[must_use]
pub const fn varint_len(value: u32) -> usize {
    if value == 0 {
        return 1;
    }
    let bits_needed = 32 - value.leading_zeros();
    (bits_needed as usize).div_ceil(7)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VarInt(pub u32);

impl VarInt {
    pub fn encoded_len(&self) -> usize {
        varint_len(self.0)
    }

    pub fn read_from(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (value, n) = decode_varint(bytes, offset)?;
        Ok((VarInt(value), n))
    }

    pub fn write_to<B: BufMut>(&self, out: &mut B) -> usize {
        encode_varint(self.0, out)
    }
}

impl From<u32> for VarInt {
    fn from(value: u32) -> Self {
        VarInt(value)
    }
}

impl From<VarInt> for u32 {
    fn from(value: VarInt) -> Self {
        value.0
    }
}
