use std::{io, path::PathBuf, time::Duration};
use thiserror::Error;

pub use statusboard_protocol::packet::PacketError;

/// Errors that end a single client connection.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] PacketError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Connection closed by peer")]
    ConnectionClosed,
}

impl SessionError {
    /// Errors caused by a misbehaving or impatient client rather than by us.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            SessionError::Protocol(_) | SessionError::Timeout(_) | SessionError::ConnectionClosed
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to load favicon {path}: {source}")]
    Favicon {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid bind address '{0}'")]
    InvalidBind(String),

    #[error("Failed to serialize status response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
