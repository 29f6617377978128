//! Listed application entries.

use serde::Deserialize;

/// One application repository shown in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    /// Repository name, always starting with the configured app prefix.
    pub name: String,

    /// Repository web URL.
    pub url: String,

    /// Trimmed repository description; empty when the repository has none.
    pub description: String,
}

impl AppEntry {
    /// Creates an entry, trimming the description.
    pub fn new(name: impl Into<String>, url: impl Into<String>, description: &str) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: description.trim().to_string(),
        }
    }
}

/// The subset of a repository object returned by `GET /orgs/{org}/repos` that the
/// directory needs.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrgRepository {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<OrgRepository> for AppEntry {
    fn from(repo: OrgRepository) -> Self {
        Self::new(
            repo.name,
            repo.html_url,
            repo.description.as_deref().unwrap_or_default(),
        )
    }
}
