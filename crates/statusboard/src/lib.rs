//! Statusboard - a standalone Minecraft server list responder
//!
//! Answers the Java Edition status ping with a fixed, configured entry
//! (version, player counts, description, favicon) and never lets anyone
//! log in.

pub mod core;
pub mod network;
pub mod server;
pub mod session;
pub mod telemetry;

pub use crate::core::config::{ConfigOverrides, StatusBoardConfig};
pub use crate::core::error::{ConfigError, SessionError};
pub use crate::core::status::ServerStatus;
pub use server::StatusServer;
pub use session::{Progress, Session, SessionState};
