//! GitHub token validation.

use super::ConfigError;
use std::fmt;

/// Environment variable the token is read from.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Prefix every classic personal access token carries.
pub const TOKEN_PREFIX: &str = "ghp_";

/// A validated GitHub personal access token.
///
/// The value is never printed; [`fmt::Debug`] is redacted.
#[derive(Clone)]
pub struct GitHubToken(String);

impl GitHubToken {
    /// Validates a raw token value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] when the value is absent or blank and
    /// [`ConfigError::MalformedToken`] when it lacks the [`TOKEN_PREFIX`].
    pub fn parse(raw: Option<String>) -> Result<Self, ConfigError> {
        let raw = match raw {
            Some(value) if !value.trim().is_empty() => value,
            _ => return Err(ConfigError::MissingToken { var: TOKEN_ENV }),
        };

        // Prefix is checked on the value as given, leading whitespace included.
        if !raw.starts_with(TOKEN_PREFIX) {
            return Err(ConfigError::MalformedToken {
                var: TOKEN_ENV,
                prefix: TOKEN_PREFIX,
            });
        }

        Ok(Self(raw))
    }

    /// Reads and validates the token from [`TOKEN_ENV`].
    ///
    /// # Errors
    ///
    /// See [`GitHubToken::parse`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse(std::env::var(TOKEN_ENV).ok())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GitHubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GitHubToken(\"ghp_***\")")
    }
}
