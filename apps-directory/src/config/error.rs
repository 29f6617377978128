//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Validation error in a config value.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// Missing required file.
    #[error("Missing required file: {path}")]
    MissingFile { path: String },

    /// No token was provided.
    #[error("Please set {var} (with repo scope)")]
    MissingToken { var: &'static str },

    /// The token does not look like a personal access token.
    #[error("{var} must be a personal access token starting with '{prefix}'")]
    MalformedToken {
        var: &'static str,
        prefix: &'static str,
    },

    /// Unknown write transport name.
    #[error("Unknown transport '{name}', expected 'content-api' or 'working-copy'")]
    UnknownTransport { name: String },
}

impl ConfigError {
    /// Returns true for token problems, which are reported before any network call.
    #[must_use]
    pub fn is_token_error(&self) -> bool {
        matches!(self, Self::MissingToken { .. } | Self::MalformedToken { .. })
    }
}
