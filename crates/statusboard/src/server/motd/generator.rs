use statusboard_protocol::minecraft::java::status::clientbound_response::{
    DescriptionJSON, PlayersJSON, ResponseJSON, VersionJSON,
};

use crate::core::config::StatusBoardConfig;

/// Builds the server list entry from the configuration.
///
/// `favicon` must already be resolved (see [`super::favicon::load_favicon`]).
pub fn generate_response(config: &StatusBoardConfig, favicon: String) -> ResponseJSON {
    ResponseJSON {
        version: VersionJSON {
            name: config.version_name.clone(),
            protocol: config.protocol().protocol_number(),
        },
        players: PlayersJSON {
            max: config.max_players,
            online: config.online_players,
        },
        description: DescriptionJSON {
            text: config.description.clone(),
        },
        favicon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_response() {
        let config = StatusBoardConfig {
            version_name: "1.15.2".to_string(),
            max_players: 100,
            online_players: 42,
            description: "Hello".to_string(),
            ..Default::default()
        };

        let response = generate_response(&config, String::new());
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"version":{"name":"1.15.2","protocol":578},"players":{"max":100,"online":42},"description":{"text":"Hello"},"favicon":""}"#
        );
    }

    #[test]
    fn test_unknown_version_keeps_name() {
        let config = StatusBoardConfig {
            version_name: "Custom 1.0".to_string(),
            ..Default::default()
        };

        let response = generate_response(&config, "data:image/png;base64,AA==".to_string());
        assert_eq!(response.version.name, "Custom 1.0");
        assert_eq!(response.version.protocol, 340);
        assert_eq!(response.favicon, "data:image/png;base64,AA==");
    }
}
