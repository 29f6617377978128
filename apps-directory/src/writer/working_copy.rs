//! README writes through a local clone of the directory repository.

use super::WriteError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Result of [`WorkingCopy::commit_and_push_if_dirty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The working tree had changes; they were committed and pushed.
    Pushed,
    /// `git status --porcelain` was empty; nothing was committed.
    Clean,
}

/// Version-control operations the working-copy transport relies on.
#[allow(async_fn_in_trait)]
pub trait WorkingCopy {
    /// Root of the local clone.
    fn path(&self) -> &Path;

    /// Clones the repository if no local copy exists.
    ///
    /// Returns true if a fresh clone was made, which is already on the
    /// configured branch.
    async fn ensure_clone(&self) -> Result<bool, WriteError>;

    /// Brings an existing clone to the tip of the configured branch.
    async fn sync_to_branch(&self) -> Result<(), WriteError>;

    /// Stages `file` and commits and pushes it only if the tree is dirty.
    async fn commit_and_push_if_dirty(
        &self,
        file: &Path,
        message: &str,
    ) -> Result<CommitOutcome, WriteError>;
}

/// Committer identity for generated commits.
#[derive(Debug, Clone)]
pub struct GitIdentity {
    /// `user.name`.
    pub name: String,
    /// `user.email`.
    pub email: String,
}

/// [`WorkingCopy`] backed by the `git` command line.
///
/// The remote URL never carries credentials. A token is sent as an HTTP
/// `Authorization` header on each git invocation, so nothing secret is written
/// to `.git/config` and a rotated token takes effect on the next run.
#[derive(Clone)]
pub struct GitWorkingCopy {
    path: PathBuf,
    remote_url: String,
    branch: String,
    identity: GitIdentity,
    auth_header: Option<String>,
}

impl GitWorkingCopy {
    /// Creates a working copy rooted at `path`, tracking `branch` of `remote_url`.
    pub fn new(
        path: impl Into<PathBuf>,
        remote_url: impl Into<String>,
        branch: impl Into<String>,
        identity: GitIdentity,
    ) -> Self {
        Self {
            path: path.into(),
            remote_url: remote_url.into(),
            branch: branch.into(),
            identity,
            auth_header: None,
        }
    }

    /// Authenticates every git invocation with `token`.
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        let credentials = STANDARD.encode(format!("x-access-token:{token}"));
        self.auth_header = Some(format!(
            "http.extraHeader=Authorization: Basic {credentials}"
        ));
        self
    }

    /// Builds the HTTPS remote for `owner/repo` on `host`.
    #[must_use]
    pub fn https_remote(host: &str, owner: &str, repo: &str) -> String {
        format!("https://{host}/{owner}/{repo}.git")
    }

    fn has_clone(&self) -> bool {
        self.path.join(".git").exists()
    }

    /// Runs git in `dir` with the credential header applied.
    async fn run_git(&self, dir: &Path, args: &[&str]) -> Result<String, WriteError> {
        let mut full: Vec<&str> = Vec::with_capacity(args.len() + 2);
        if let Some(header) = &self.auth_header {
            full.extend(["-c", header.as_str()]);
        }
        full.extend_from_slice(args);

        let command = args.first().copied().unwrap_or_default();
        run_git_command(dir, command, &full).await
    }
}

impl fmt::Debug for GitWorkingCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitWorkingCopy")
            .field("path", &self.path)
            .field("remote_url", &self.remote_url)
            .field("branch", &self.branch)
            .field("identity", &self.identity)
            .field("authenticated", &self.auth_header.is_some())
            .finish()
    }
}

impl WorkingCopy for GitWorkingCopy {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_clone(&self) -> Result<bool, WriteError> {
        if self.has_clone() {
            debug!(path = %self.path.display(), "Working copy exists");
            return Ok(false);
        }

        info!(path = %self.path.display(), branch = %self.branch, "Cloning directory repository");
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|e| WriteError::IoError {
                path: parent.display().to_string(),
                source: e,
            })?;

        let target = self.path.to_string_lossy().to_string();
        self.run_git(
            Path::new("."),
            &["clone", "--branch", &self.branch, &self.remote_url, &target],
        )
        .await?;

        Ok(true)
    }

    async fn sync_to_branch(&self) -> Result<(), WriteError> {
        info!(branch = %self.branch, "Syncing working copy");
        // Clones made with an older remote (or credentials in the URL) follow the current one.
        self.run_git(&self.path, &["remote", "set-url", "origin", &self.remote_url])
            .await?;
        self.run_git(&self.path, &["fetch", "origin"]).await?;
        self.run_git(&self.path, &["checkout", &self.branch]).await?;
        self.run_git(&self.path, &["pull", "--ff-only", "origin", &self.branch])
            .await?;
        Ok(())
    }

    async fn commit_and_push_if_dirty(
        &self,
        file: &Path,
        message: &str,
    ) -> Result<CommitOutcome, WriteError> {
        let file = file.to_string_lossy();
        self.run_git(&self.path, &["add", "--", &file]).await?;

        let status = self.run_git(&self.path, &["status", "--porcelain"]).await?;
        if status.trim().is_empty() {
            info!("Working tree clean, nothing to commit");
            return Ok(CommitOutcome::Clean);
        }

        debug!(status = %status.trim(), "Committing changes");
        self.run_git(&self.path, &["config", "user.name", &self.identity.name])
            .await?;
        self.run_git(&self.path, &["config", "user.email", &self.identity.email])
            .await?;
        self.run_git(&self.path, &["commit", "-m", message]).await?;
        self.run_git(&self.path, &["push", "origin", &format!("HEAD:{}", self.branch)])
            .await?;

        info!(branch = %self.branch, "Pushed README update");
        Ok(CommitOutcome::Pushed)
    }
}

/// Runs git in `dir` and returns its stdout.
///
/// Errors name only `command`, never the full argument list.
async fn run_git_command(
    dir: &Path,
    command: &str,
    args: &[&str],
) -> Result<String, WriteError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| WriteError::GitFailed {
            command: command.to_string(),
            message: format!("failed to execute: {e}"),
        })?;

    if !output.status.success() {
        return Err(WriteError::GitFailed {
            command: command.to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
