pub mod handshake;
pub mod status;
