//! Run outcome types.

use serde::Serialize;

/// What a run did to the directory README.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The README was updated through the contents API.
    Updated {
        /// URL of the created commit.
        commit_url: String,
    },

    /// The working copy was committed and pushed.
    Committed,

    /// Nothing was written.
    Unchanged {
        /// Why the write was skipped.
        reason: String,
    },

    /// Dry run; nothing was written.
    Previewed {
        /// Whether a live run would have written.
        changed: bool,
    },
}

impl RunOutcome {
    /// Returns true if the run changed the directory repository.
    #[must_use]
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Updated { .. } | Self::Committed)
    }
}
