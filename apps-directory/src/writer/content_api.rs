//! README reads and conditional writes through the GitHub contents API.

use super::WriteError;
use crate::config::ReadmeTarget;
use crate::readme::ReadmeDocument;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Instrument};

#[derive(Serialize)]
struct RefParams<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
}

/// The fields of a contents API file response the writer needs.
#[derive(Debug, Deserialize)]
struct FileContent {
    sha: String,
    content: String,
}

/// Request body for `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Serialize)]
struct FileUpdateRequest<'a> {
    message: &'a str,
    content: String,
    sha: &'a str,
    branch: &'a str,
}

#[derive(Debug, Deserialize)]
struct FileUpdateResponse {
    commit: CommitRef,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
    #[serde(default)]
    html_url: Option<String>,
}

/// Fetches the README and the blob sha it is stored at.
///
/// # Errors
///
/// Returns [`WriteError`] if the request fails or the content is not base64
/// encoded UTF-8.
pub async fn fetch_readme(
    octocrab: &Octocrab,
    target: &ReadmeTarget,
) -> Result<ReadmeDocument, WriteError> {
    let span = info_span!("fetch_readme", repo = %target.full_name(), path = %target.path);

    async {
        debug!(branch = %target.branch, "Fetching README");
        let params = RefParams {
            git_ref: &target.branch,
        };
        let file: FileContent = octocrab
            .get(target.contents_route(), Some(&params))
            .await?;

        let text = decode_content(&file.content).map_err(|message| WriteError::DecodeFailed {
            path: target.path.clone(),
            message,
        })?;

        info!(sha = %file.sha, bytes = text.len(), "Fetched README");
        Ok(ReadmeDocument::parse(&text, file.sha))
    }
    .instrument(span)
    .await
}

/// Writes `text` as the new README, conditional on the blob still being `sha`.
///
/// Returns the URL of the created commit. A stale `sha` is rejected by GitHub
/// and surfaces as [`WriteError::GitHubError`].
///
/// # Errors
///
/// Returns [`WriteError`] if the update is rejected or the request fails.
pub async fn update_readme(
    octocrab: &Octocrab,
    target: &ReadmeTarget,
    text: &str,
    sha: &str,
    message: &str,
) -> Result<String, WriteError> {
    let span = info_span!("update_readme", repo = %target.full_name(), path = %target.path);

    async {
        info!(sha = %sha, "Pushing updated README");
        let body = FileUpdateRequest {
            message,
            content: STANDARD.encode(text.as_bytes()),
            sha,
            branch: &target.branch,
        };
        let response: FileUpdateResponse = octocrab
            .put(target.contents_route(), Some(&body))
            .await?;

        let url = response.commit.html_url.unwrap_or_else(|| {
            format!(
                "https://github.com/{}/commit/{}",
                target.full_name(),
                response.commit.sha
            )
        });
        info!(commit = %url, "README updated");
        Ok(url)
    }
    .instrument(span)
    .await
}

/// Decodes contents API base64, which GitHub wraps at 60 columns.
fn decode_content(encoded: &str) -> Result<String, String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact).map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}
