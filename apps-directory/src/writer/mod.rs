//! Write-back transports for the regenerated README.
//!
//! - [`content_api`]: one conditional `PUT` through the GitHub contents API,
//!   guarded by the blob sha the README was fetched at.
//! - [`working_copy`]: a local clone that is overwritten, then committed and
//!   pushed only when `git status` reports changes.

pub mod content_api;
mod error;
pub mod working_copy;

pub use content_api::{fetch_readme, update_readme};
pub use error::WriteError;
pub use working_copy::{CommitOutcome, GitIdentity, GitWorkingCopy, WorkingCopy};
