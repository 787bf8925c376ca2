use std::fmt;

/// Protocol version numbers for released Minecraft versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version(i32);

/// Release names and their protocol numbers, oldest first.
const KNOWN_VERSIONS: &[(&str, i32)] = &[
    ("1.7.2", 4),
    ("1.7.10", 5),
    ("1.8.9", 47),
    ("1.9", 107),
    ("1.9.4", 110),
    ("1.10.2", 210),
    ("1.11", 315),
    ("1.11.2", 316),
    ("1.12", 335),
    ("1.12.1", 338),
    ("1.12.2", 340),
    ("1.13", 393),
    ("1.13.2", 404),
    ("1.14.4", 498),
    ("1.15.2", 578),
    ("1.16.5", 754),
    ("1.17.1", 756),
    ("1.18.1", 757),
    ("1.18.2", 758),
    ("1.19", 759),
    ("1.19.2", 760),
    ("1.19.3", 761),
    ("1.19.4", 762),
    ("1.20.1", 763),
    ("1.20.2", 764),
    ("1.20.4", 765),
    ("1.20.6", 766),
    ("1.21.1", 767),
    ("1.21.3", 768),
    ("1.21.4", 769),
];

impl Version {
    /// Protocol version for Minecraft 1.12.2
    pub const V1_12_2: Version = Version(340);

    /// Advertised when a configured version name is not in the table.
    pub const FALLBACK: Version = Version::V1_12_2;

    /// Creates a new Version from a protocol number
    pub const fn new(protocol: i32) -> Self {
        Version(protocol)
    }

    /// Returns the protocol number
    pub const fn protocol_number(&self) -> i32 {
        self.0
    }

    /// Looks up the protocol number for a release name such as "1.12.2".
    pub fn from_name(name: &str) -> Option<Self> {
        KNOWN_VERSIONS
            .iter()
            .find(|(known, _)| *known == name.trim())
            .map(|&(_, protocol)| Version(protocol))
    }

    /// Returns the version name (e.g., "1.12.2")
    pub fn name(&self) -> &'static str {
        KNOWN_VERSIONS
            .iter()
            .find(|&&(_, protocol)| protocol == self.0)
            .map(|&(name, _)| name)
            .unwrap_or("Unknown Version")
    }
}

impl From<i32> for Version {
    fn from(protocol: i32) -> Self {
        Version(protocol)
    }
}

impl From<Version> for i32 {
    fn from(version: Version) -> Self {
        version.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_lookup() {
        assert_eq!(Version::from_name("1.12.2"), Some(Version::V1_12_2));
        assert_eq!(Version::from_name(" 1.15.2 "), Some(Version::new(578)));
        assert_eq!(Version::from_name("1.21.4"), Some(Version::new(769)));
        assert_eq!(Version::from_name("b1.7.3"), None);
    }

    #[test]
    fn test_version_names() {
        assert_eq!(Version::V1_12_2.name(), "1.12.2");
        assert_eq!(Version::new(765).name(), "1.20.4");
        assert_eq!(Version::new(0).name(), "Unknown Version");
        assert_eq!(format!("{}", Version::new(578)), "1.15.2");
    }

    #[test]
    fn test_table_is_ordered() {
        for pair in KNOWN_VERSIONS.windows(2) {
            assert!(Version(pair[0].1) < Version(pair[1].1), "{pair:?}");
        }
    }

    #[test]
    fn test_version_conversion() {
        let version = Version::from(340);
        assert_eq!(version, Version::FALLBACK);
        assert_eq!(i32::from(version), 340);
    }
}
