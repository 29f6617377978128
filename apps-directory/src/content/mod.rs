//! Markdown content for the Apps directory.
//!
//! Builds the bullet list and footer either as a section to splice into an
//! existing README or as a complete document. Everything here is a pure
//! function of the entries and the timestamp it is given.

mod error;
mod renderer;
mod stamp;

pub use error::TemplateError;
pub use renderer::{DocumentRenderer, DEFAULT_DOCUMENT_TEMPLATE};
pub use stamp::StampStyle;

use crate::listing::AppEntry;
use chrono::{DateTime, Utc};

/// Heading that opens the generated section.
pub const APPS_HEADING: &str = "## Apps";

/// Renders one markdown bullet.
///
/// Format: `- [name](url) — description`, without the dash clause when the
/// description is empty.
#[must_use]
pub fn format_bullet(entry: &AppEntry) -> String {
    if entry.description.is_empty() {
        format!("- [{}]({})", entry.name, entry.url)
    } else {
        format!("- [{}]({}) — {}", entry.name, entry.url, entry.description)
    }
}

/// Builds the lines of the `## Apps` section for splicing into a README.
///
/// Ends with a blank line so whatever follows is separated from the footer.
#[must_use]
pub fn build_apps_section(entries: &[AppEntry], updated: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len() + 5);
    lines.push(APPS_HEADING.to_string());
    lines.push(String::new());
    lines.extend(entries.iter().map(format_bullet));
    lines.push(String::new());
    lines.push(StampStyle::Human.footer(updated));
    lines.push(String::new());
    lines
}
