//! Write transport selection.

use super::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How the regenerated README reaches the directory repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteTransport {
    /// Splice the Apps section into the existing README and PUT it through the contents API.
    #[default]
    ContentApi,

    /// Overwrite the README in a local clone, then commit and push if dirty.
    WorkingCopy,
}

impl WriteTransport {
    /// Returns the transport name as used in config files and on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContentApi => "content-api",
            Self::WorkingCopy => "working-copy",
        }
    }
}

impl fmt::Display for WriteTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WriteTransport {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content-api" => Ok(Self::ContentApi),
            "working-copy" => Ok(Self::WorkingCopy),
            other => Err(ConfigError::UnknownTransport {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transport_names() {
        assert_eq!(
            "content-api".parse::<WriteTransport>().unwrap(),
            WriteTransport::ContentApi
        );
        assert_eq!(
            "working-copy".parse::<WriteTransport>().unwrap(),
            WriteTransport::WorkingCopy
        );
        assert!(matches!(
            "ftp".parse::<WriteTransport>(),
            Err(ConfigError::UnknownTransport { .. })
        ));
    }
}
