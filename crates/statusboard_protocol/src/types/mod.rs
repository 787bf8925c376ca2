pub mod var_numbers;

pub use var_numbers::{MAX_VARINT_LEN, VarInt, decode_varint, encode_varint, varint_len};
