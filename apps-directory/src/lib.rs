#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod content;
pub mod listing;
pub mod readme;
pub mod runner;
pub mod summary;
pub mod writer;

pub use config::{
    ConfigError, DirectoryConfig, GitHubToken, ReadmeTarget, WriteTransport, TOKEN_ENV,
    TOKEN_PREFIX,
};
pub use content::{
    build_apps_section, format_bullet, DocumentRenderer, StampStyle, TemplateError, APPS_HEADING,
};
pub use listing::{list_app_repositories, sort_entries, AppEntry, AppFilter, ListingError};
pub use readme::{join_normalized, split_sections, ReadmeDocument, Sections, COMMUNITY_HEADING};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::{RunOutcome, RunSummary};
pub use writer::{
    fetch_readme, update_readme, CommitOutcome, GitIdentity, GitWorkingCopy, WorkingCopy,
    WriteError,
};
