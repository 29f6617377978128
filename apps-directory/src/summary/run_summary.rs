//! Run summary types.

use super::outcome::RunOutcome;
use crate::config::WriteTransport;

/// Summary of a complete run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Transport used for the write.
    pub transport: WriteTransport,

    /// Number of app repositories listed.
    pub apps_listed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,

    /// What happened to the README.
    pub outcome: RunOutcome,
}

impl RunSummary {
    /// Creates a summary.
    #[must_use]
    pub fn new(
        transport: WriteTransport,
        apps_listed: usize,
        dry_run: bool,
        outcome: RunOutcome,
    ) -> Self {
        Self {
            transport,
            apps_listed,
            dry_run,
            outcome,
        }
    }

    /// Returns a one-line description of the outcome.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.outcome {
            RunOutcome::Updated { commit_url } => format!("README updated: {commit_url}"),
            RunOutcome::Committed => "README committed and pushed".to_string(),
            RunOutcome::Unchanged { reason } => format!("No changes: {reason}"),
            RunOutcome::Previewed { changed: true } => "Dry run: README would change".to_string(),
            RunOutcome::Previewed { changed: false } => {
                "Dry run: README is up to date".to_string()
            }
        }
    }
}
