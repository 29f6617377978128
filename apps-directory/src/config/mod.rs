//! Configuration loading and validation.
//!
//! Everything the pipeline needs to know about the organization, the directory
//! repository and the write transport lives in [`DirectoryConfig`]. It is loaded
//! from an optional `directory.toml` file; every key has a default.

mod error;
mod token;
mod transport;

pub use error::ConfigError;
pub use token::{GitHubToken, TOKEN_ENV, TOKEN_PREFIX};
pub use transport::WriteTransport;

use bstr::ByteSlice;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Settings for one regeneration run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Organization owning the `App-*` repositories and the directory repository.
    pub org: String,

    /// Repository holding the generated README.
    pub repo: String,

    /// Branch the README lives on.
    pub branch: String,

    /// Path of the README inside the directory repository.
    pub readme_path: String,

    /// Name prefix marking a repository as a listed app.
    pub app_prefix: String,

    /// Sub-prefix excluded from the listing (e.g. community apps).
    pub exclude_prefix: Option<String>,

    /// How the README is written back.
    pub transport: WriteTransport,

    /// Local clone used by the working-copy transport.
    pub workdir: PathBuf,

    /// GitHub REST API root.
    pub api_base: String,

    /// Host the working copy is cloned from.
    pub git_host: String,

    /// Commit message for README updates.
    pub commit_message: String,

    /// Markdown placed above the Apps section in a fully generated README.
    pub header: String,

    /// Handlebars template overriding the built-in full document layout.
    pub template_path: Option<PathBuf>,

    /// Committer name used by the working-copy transport.
    pub git_user_name: String,

    /// Committer email used by the working-copy transport.
    pub git_user_email: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            org: "Companion-TheCube".to_string(),
            repo: "TheCube-apps-directory".to_string(),
            branch: "main".to_string(),
            readme_path: "README.md".to_string(),
            app_prefix: "App-".to_string(),
            exclude_prefix: None,
            transport: WriteTransport::default(),
            workdir: PathBuf::from("apps-directory-checkout"),
            api_base: "https://api.github.com".to_string(),
            git_host: "github.com".to_string(),
            commit_message: "chore: update Apps section".to_string(),
            header: "# Apps Directory\n\nApplications published by the organization. \
                     This file is generated; edits to the Apps section are overwritten."
                .to_string(),
            template_path: None,
            git_user_name: "Apps Directory Bot".to_string(),
            git_user_email: "bot@apps-directory".to_string(),
        }
    }
}

impl DirectoryConfig {
    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, not valid TOML,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading directory config");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate(path)?;
        debug!(org = %config.org, repo = %config.repo, transport = %config.transport, "Config loaded");
        Ok(config)
    }

    /// Checks the values for consistency.
    ///
    /// `origin` names where the values came from and only appears in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem found.
    pub fn validate(&self, origin: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: origin.display().to_string(),
            message,
        };

        for (key, value) in [
            ("org", &self.org),
            ("repo", &self.repo),
            ("readme-path", &self.readme_path),
            ("app-prefix", &self.app_prefix),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("{key} must not be empty")));
            }
        }

        if let Some(exclude) = &self.exclude_prefix {
            if !exclude.starts_with(&self.app_prefix) || exclude == &self.app_prefix {
                return Err(invalid(format!(
                    "exclude-prefix '{exclude}' must extend app-prefix '{}'",
                    self.app_prefix
                )));
            }
        }

        if Url::parse(&self.api_base).is_err() {
            return Err(invalid(format!(
                "api-base is not a valid URL: {}",
                self.api_base
            )));
        }

        if let Err(e) = gix_validate::reference::name_partial(self.branch.as_bytes().as_bstr()) {
            return Err(invalid(format!(
                "branch '{}' is not a valid ref name: {e}",
                self.branch
            )));
        }

        Ok(())
    }

    /// Returns the location of the README the pipeline rewrites.
    #[must_use]
    pub fn readme_target(&self) -> ReadmeTarget {
        ReadmeTarget {
            owner: self.org.clone(),
            repo: self.repo.clone(),
            branch: self.branch.clone(),
            path: self.readme_path.clone(),
        }
    }
}

/// A single file on a branch of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeTarget {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch holding the file.
    pub branch: String,
    /// Path inside the repository.
    pub path: String,
}

impl ReadmeTarget {
    /// Returns `owner/repo`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Returns the contents API route for the file.
    #[must_use]
    pub fn contents_route(&self) -> String {
        format!(
            "/repos/{}/{}/contents/{}",
            self.owner,
            self.repo,
            self.path.trim_start_matches('/')
        )
    }
}
