//! Writer error types.

use thiserror::Error;

/// Errors that can occur while reading or writing the directory README.
#[derive(Debug, Error)]
pub enum WriteError {
    /// GitHub API error, including a rejected (stale) blob sha.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The contents API returned something that is not base64 UTF-8 text.
    #[error("Failed to decode '{path}': {message}")]
    DecodeFailed { path: String, message: String },

    /// A git subprocess could not be started or exited non-zero.
    #[error("git {command} failed: {message}")]
    GitFailed { command: String, message: String },

    /// Local filesystem error in the working copy.
    #[error("Failed to access '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
