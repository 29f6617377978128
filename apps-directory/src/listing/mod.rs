//! Organization repository listing.
//!
//! Pages through every repository of an organization and keeps the ones whose
//! name marks them as a directory-listed app.

mod entry;
mod error;

pub use entry::AppEntry;
pub use error::ListingError;

use entry::OrgRepository;
use octocrab::Octocrab;
use serde::Serialize;
use tracing::{debug, info, info_span, Instrument};

/// Results per page for the organization repository listing.
pub const REPOS_PER_PAGE: u8 = 100;

/// Name-prefix predicate selecting app repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppFilter {
    prefix: String,
    exclude_prefix: Option<String>,
}

impl AppFilter {
    /// Creates a filter keeping names that start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            exclude_prefix: None,
        }
    }

    /// Additionally drops names starting with `exclude_prefix`.
    #[must_use]
    pub fn excluding(mut self, exclude_prefix: Option<String>) -> Self {
        self.exclude_prefix = exclude_prefix;
        self
    }

    /// Returns true if the repository name belongs in the directory.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        if !name.starts_with(&self.prefix) {
            return false;
        }
        match &self.exclude_prefix {
            Some(excluded) => !name.starts_with(excluded.as_str()),
            None => true,
        }
    }
}

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

/// Lists every app repository of `org`, sorted case-insensitively by name.
///
/// Requests pages of [`REPOS_PER_PAGE`] until a page comes back empty.
///
/// # Errors
///
/// Returns [`ListingError`] on the first failed request; nothing is retried.
pub async fn list_app_repositories(
    octocrab: &Octocrab,
    org: &str,
    filter: &AppFilter,
) -> Result<Vec<AppEntry>, ListingError> {
    let span = info_span!("list_apps", org = %org, prefix = %filter.prefix);

    async {
        info!("Listing organization repositories");

        let mut apps = Vec::new();
        let mut page = 1u32;
        let mut seen = 0usize;

        loop {
            let batch = fetch_page(octocrab, org, page).await?;
            if batch.is_empty() {
                break;
            }

            debug!(page, count = batch.len(), "Fetched repository page");
            seen += batch.len();
            apps.extend(select_apps(batch, filter));
            page += 1;
        }

        sort_entries(&mut apps);
        info!(repositories = seen, apps = apps.len(), "Listing complete");
        Ok(apps)
    }
    .instrument(span)
    .await
}

/// Fetches one page of the organization's repositories.
async fn fetch_page(
    octocrab: &Octocrab,
    org: &str,
    page: u32,
) -> Result<Vec<OrgRepository>, ListingError> {
    let route = format!("/orgs/{org}/repos");
    let params = PageParams {
        per_page: REPOS_PER_PAGE,
        page,
    };
    Ok(octocrab.get(route, Some(&params)).await?)
}

/// Keeps the repositories accepted by `filter`.
fn select_apps(
    batch: Vec<OrgRepository>,
    filter: &AppFilter,
) -> impl Iterator<Item = AppEntry> + '_ {
    batch
        .into_iter()
        .filter(move |repo| filter.matches(&repo.name))
        .map(AppEntry::from)
}

/// Sorts entries by lowercased name, keeping the fetch order for ties.
pub fn sort_entries(entries: &mut [AppEntry]) {
    entries.sort_by_cached_key(|entry| entry.name.to_lowercase());
}
