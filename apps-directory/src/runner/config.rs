//! Runner configuration.

use crate::config::{DirectoryConfig, GitHubToken};

/// Configuration for one regeneration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Organization, directory repository and transport settings.
    directory: DirectoryConfig,
    /// GitHub token used for API calls and git pushes.
    token: GitHubToken,
    /// Whether to preview the README without writing it.
    dry_run: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(directory: DirectoryConfig, token: GitHubToken) -> Self {
        Self {
            directory,
            token,
            dry_run: false,
        }
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the directory settings.
    pub fn directory(&self) -> &DirectoryConfig {
        &self.directory
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &GitHubToken {
        &self.token
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
