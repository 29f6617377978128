//! Orchestrates a directory regeneration run.
//!
//! The pipeline is strictly sequential: list the app repositories, build the
//! new README content, then hand it to the configured write transport.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::config::WriteTransport;
use crate::content::DocumentRenderer;
use crate::listing::{list_app_repositories, AppEntry, AppFilter};
use crate::summary::{RunOutcome, RunSummary};
use crate::writer::{
    fetch_readme, update_readme, CommitOutcome, GitIdentity, GitWorkingCopy, WorkingCopy,
    WriteError,
};
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, info_span, warn, Instrument};

/// Runs the lister, content builder and writer for one directory README.
pub struct Runner {
    config: RunnerConfig,
    octocrab: Octocrab,
}

impl Runner {
    /// Builds a runner and its authenticated GitHub client.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Octocrab`] if the client cannot be built (e.g. an
    /// unusable `api-base`).
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let octocrab = Octocrab::builder()
            .base_uri(config.directory().api_base.clone())?
            .personal_token(config.token().expose().to_string())
            .build()?;
        Ok(Self { config, octocrab })
    }

    /// Executes the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; nothing is retried or rolled back.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let directory = self.config.directory();
        let now = Utc::now();

        let filter = AppFilter::new(directory.app_prefix.clone())
            .excluding(directory.exclude_prefix.clone());
        let apps = list_app_repositories(&self.octocrab, &directory.org, &filter).await?;

        let outcome = match directory.transport {
            WriteTransport::ContentApi => self.write_via_content_api(&apps, now).await?,
            WriteTransport::WorkingCopy => {
                let copy = GitWorkingCopy::new(
                    directory.workdir.clone(),
                    GitWorkingCopy::https_remote(
                        &directory.git_host,
                        &directory.org,
                        &directory.repo,
                    ),
                    directory.branch.clone(),
                    GitIdentity {
                        name: directory.git_user_name.clone(),
                        email: directory.git_user_email.clone(),
                    },
                )
                .with_token(self.config.token().expose());
                self.write_via_working_copy(&copy, &apps, now).await?
            }
        };

        Ok(RunSummary::new(
            directory.transport,
            apps.len(),
            self.config.dry_run(),
            outcome,
        ))
    }

    /// Splices the Apps section into the remote README and PUTs it if it changed.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Write`] if the README cannot be fetched or the
    /// conditional update is rejected.
    pub async fn write_via_content_api(
        &self,
        apps: &[AppEntry],
        now: DateTime<Utc>,
    ) -> Result<RunOutcome, RunnerError> {
        let directory = self.config.directory();
        let target = directory.readme_target();
        let span = info_span!("content_api", repo = %target.full_name());

        async {
            let document = fetch_readme(&self.octocrab, &target).await?;
            if !document.sections().has_apps_section {
                warn!(path = %target.path, "README has no '## Apps' heading, leaving it as is");
            }

            let new_text = document.regenerate(apps, now);
            let changed = !document.is_unchanged(&new_text);

            if self.config.dry_run() {
                print_preview(&target.path, &new_text, changed);
                return Ok(RunOutcome::Previewed { changed });
            }

            if !changed {
                info!("No changes in Apps section, skipping update");
                return Ok(RunOutcome::Unchanged {
                    reason: "Apps section unchanged".to_string(),
                });
            }

            let commit_url = update_readme(
                &self.octocrab,
                &target,
                &new_text,
                document.sha(),
                &directory.commit_message,
            )
            .await?;
            Ok(RunOutcome::Updated { commit_url })
        }
        .instrument(span)
        .await
    }

    /// Regenerates the whole README in a local clone and commits it if dirty.
    ///
    /// Walks `NoLocalCopy -> Cloned -> Synced -> Written` and ends either
    /// committed and pushed or as a no-op. A dry run renders against whatever
    /// is on disk without running git.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error; the working copy is left as is.
    pub async fn write_via_working_copy<W: WorkingCopy>(
        &self,
        copy: &W,
        apps: &[AppEntry],
        now: DateTime<Utc>,
    ) -> Result<RunOutcome, RunnerError> {
        let directory = self.config.directory();
        let span = info_span!("working_copy", path = %copy.path().display());

        async {
            let renderer = match &directory.template_path {
                Some(path) => DocumentRenderer::from_file(path)?,
                None => DocumentRenderer::new()?,
            };
            let relative = Path::new(&directory.readme_path);
            let file = copy.path().join(relative);

            if self.config.dry_run() {
                let existing = read_existing(&file).await?;
                let new_text = renderer.regenerate_document(
                    &directory.header,
                    apps,
                    existing.as_deref(),
                    now,
                )?;
                let changed = existing.as_deref() != Some(new_text.as_str());
                print_preview(&directory.readme_path, &new_text, changed);
                return Ok(RunOutcome::Previewed { changed });
            }

            if !copy.ensure_clone().await? {
                copy.sync_to_branch().await?;
            }

            let existing = read_existing(&file).await?;
            let new_text =
                renderer.regenerate_document(&directory.header, apps, existing.as_deref(), now)?;
            write_file(&file, &new_text).await?;
            info!(path = %file.display(), "Wrote README");

            match copy
                .commit_and_push_if_dirty(relative, &directory.commit_message)
                .await?
            {
                CommitOutcome::Pushed => Ok(RunOutcome::Committed),
                CommitOutcome::Clean => Ok(RunOutcome::Unchanged {
                    reason: "working tree clean".to_string(),
                }),
            }
        }
        .instrument(span)
        .await
    }
}

async fn read_existing(file: &Path) -> Result<Option<String>, WriteError> {
    match tokio::fs::read_to_string(file).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(WriteError::IoError {
            path: file.display().to_string(),
            source: e,
        }),
    }
}

async fn write_file(file: &Path, text: &str) -> Result<(), WriteError> {
    let io_error = |e| WriteError::IoError {
        path: file.display().to_string(),
        source: e,
    };
    if let Some(parent) = file.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(file, text).await.map_err(io_error)
}

fn print_preview(path: &str, text: &str, changed: bool) {
    println!(
        "\n[DRY RUN] {path} ({})\n",
        if changed { "would change" } else { "unchanged" }
    );
    for line in text.lines() {
        println!("    {line}");
    }
    println!();
}
