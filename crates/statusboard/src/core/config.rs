use std::{
    fs,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
    time::Duration,
};

use clap::Args;
use serde::{Deserialize, Serialize};
use statusboard_protocol::{
    Version,
    packet::{frame::DEFAULT_MAX_FRAME_LENGTH, reader::DEFAULT_MAX_STRING_LENGTH},
};
use tracing::{debug, warn};

use super::error::ConfigError;

pub const DEFAULT_PORT: u16 = 25565;

/// Everything the status board advertises and enforces.
///
/// Loaded from YAML, with every field optional, then patched with
/// command-line overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBoardConfig {
    pub bind: String,
    pub version_name: String,
    /// Explicit protocol number. When absent it is looked up from `version_name`.
    pub protocol_version: Option<i32>,
    pub max_players: i32,
    pub online_players: i32,
    pub description: String,
    /// Empty, a `data:` URI, or a path to a PNG file.
    pub favicon: String,
    #[serde(with = "humantime_serde")]
    pub read_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub write_timeout: Duration,
    pub max_frame_length: usize,
    pub max_string_length: usize,
}

impl Default for StatusBoardConfig {
    fn default() -> Self {
        Self {
            bind: format!("0.0.0.0:{DEFAULT_PORT}"),
            version_name: Version::FALLBACK.name().to_string(),
            protocol_version: None,
            max_players: 1,
            online_players: 1,
            description: "A Minecraft status board".to_string(),
            favicon: String::new(),
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(10),
            max_frame_length: DEFAULT_MAX_FRAME_LENGTH,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }
}

/// Command-line flags that take precedence over the configuration file.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Listen address, `host:port` or a bare IP
    #[arg(short = 'a', long = "addr")]
    pub bind: Option<String>,

    /// Minecraft version name shown in the server list
    #[arg(short = 'v', long)]
    pub version_name: Option<String>,

    /// Protocol number, overrides the lookup from the version name
    #[arg(short = 'p', long = "protocol")]
    pub protocol_version: Option<i32>,

    #[arg(short = 'm', long)]
    pub max_players: Option<i32>,

    #[arg(short = 'c', long)]
    pub online_players: Option<i32>,

    /// Message of the day
    #[arg(short = 'd', long)]
    pub description: Option<String>,

    /// PNG file or data URI
    #[arg(short = 'f', long)]
    pub favicon: Option<String>,

    #[arg(long)]
    pub read_timeout_secs: Option<u64>,

    #[arg(long)]
    pub write_timeout_secs: Option<u64>,
}

impl StatusBoardConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Loads `path` when given, otherwise starts from the defaults.
    pub fn try_load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge(&mut self, overrides: ConfigOverrides) {
        if let Some(bind) = overrides.bind {
            self.bind = bind;
        }
        if let Some(version_name) = overrides.version_name {
            self.version_name = version_name;
        }
        if overrides.protocol_version.is_some() {
            self.protocol_version = overrides.protocol_version;
        }
        if let Some(max_players) = overrides.max_players {
            self.max_players = max_players;
        }
        if let Some(online_players) = overrides.online_players {
            self.online_players = online_players;
        }
        if let Some(description) = overrides.description {
            self.description = description;
        }
        if let Some(favicon) = overrides.favicon {
            self.favicon = favicon;
        }
        if let Some(secs) = overrides.read_timeout_secs {
            self.read_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = overrides.write_timeout_secs {
            self.write_timeout = Duration::from_secs(secs);
        }
    }

    /// The advertised protocol number.
    ///
    /// An explicit `protocol_version` wins. Otherwise `version_name` is looked
    /// up, falling back to 1.12.2 (340) for names not in the table.
    pub fn protocol(&self) -> Version {
        if let Some(protocol) = self.protocol_version {
            return Version::new(protocol);
        }
        Version::from_name(&self.version_name).unwrap_or_else(|| {
            warn!(
                "Unknown version name '{}', advertising protocol {}",
                self.version_name,
                Version::FALLBACK.protocol_number()
            );
            Version::FALLBACK
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_bind_addr(&self.bind)
    }
}

/// Parses `host:port`, `[v6]:port` or a bare IP (port 25565).
/// An empty host listens on all IPv4 interfaces.
pub fn parse_bind_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    let value = value.trim();
    let invalid = || ConfigError::InvalidBind(value.to_string());

    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = value.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    let (host, port) = value.rsplit_once(':').ok_or_else(invalid)?;
    let port = port.parse::<u16>().map_err(|_| invalid())?;
    let ip = if host.is_empty() {
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    } else {
        host.parse::<IpAddr>().map_err(|_| invalid())?
    };
    Ok(SocketAddr::new(ip, port))
}
