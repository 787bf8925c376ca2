use std::time::Duration;

use bytes::Bytes;
use tracing::info;

use super::{config::StatusBoardConfig, error::ConfigError};
use crate::server::motd::{favicon::load_favicon, generate_response};

/// Immutable view of the configuration shared by every session.
///
/// The status JSON is rendered once here and never touched again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    pub json: Bytes,
    pub max_frame_length: usize,
    pub max_string_length: usize,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl ServerStatus {
    pub fn from_config(config: &StatusBoardConfig) -> Result<Self, ConfigError> {
        let favicon = load_favicon(&config.favicon)?;
        let response = generate_response(config, favicon);
        let json = serde_json::to_vec(&response)?;

        info!(
            "Advertising {} (protocol {}), {}/{} players",
            response.version.name,
            response.version.protocol,
            response.players.online,
            response.players.max
        );

        Ok(Self {
            json: Bytes::from(json),
            max_frame_length: config.max_frame_length,
            max_string_length: config.max_string_length,
            read_timeout: config.read_timeout,
            write_timeout: config.write_timeout,
        })
    }

    /// A status carrying `json` verbatim with default limits.
    pub fn with_json(json: impl Into<Bytes>) -> Self {
        let defaults = StatusBoardConfig::default();
        Self {
            json: json.into(),
            max_frame_length: defaults.max_frame_length,
            max_string_length: defaults.max_string_length,
            read_timeout: defaults.read_timeout,
            write_timeout: defaults.write_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_from_default_config() {
        let status = ServerStatus::from_config(&StatusBoardConfig::default()).unwrap();
        let json: Value = serde_json::from_slice(&status.json).unwrap();

        assert_eq!(json["version"]["name"], "1.12.2");
        assert_eq!(json["version"]["protocol"], 340);
        assert_eq!(json["players"]["max"], 1);
        assert_eq!(json["description"]["text"], "A Minecraft status board");
        assert_eq!(json["favicon"], "");
        assert_eq!(status.max_frame_length, 4096);
    }

    #[test]
    fn test_missing_favicon_fails() {
        let config = StatusBoardConfig {
            favicon: "/definitely/not/here.png".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ServerStatus::from_config(&config),
            Err(ConfigError::Favicon { .. })
        ));
    }
}
