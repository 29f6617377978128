//! Runner error types.

use crate::config::ConfigError;
use crate::content::TemplateError;
use crate::listing::ListingError;
use crate::writer::WriteError;

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Repository listing errors.
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// README template errors.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// README read/write errors.
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl RunnerError {
    /// Returns true if the run failed before touching the network.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Template(TemplateError::IoError { .. })
                | Self::Template(TemplateError::RegistrationError(_))
        )
    }
}
