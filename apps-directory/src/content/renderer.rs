//! Full README rendering.

use super::{format_bullet, StampStyle, TemplateError};
use crate::listing::AppEntry;
use chrono::{DateTime, Utc};
use handlebars::{no_escape, Handlebars};
use serde_json::json;
use std::path::Path;

const DOCUMENT_TEMPLATE_NAME: &str = "document";

/// Layout of a fully generated README.
///
/// Available variables: `header`, `apps` (each with `name`, `url`,
/// `description` and the pre-rendered `bullet`), `updated` and `footer`.
pub const DEFAULT_DOCUMENT_TEMPLATE: &str = "\
{{header}}

## Apps

{{#each apps}}
{{this.bullet}}
{{/each}}

{{footer}}
";

/// Renders complete README documents from a Handlebars template.
pub struct DocumentRenderer {
    handlebars: Handlebars<'static>,
}

impl DocumentRenderer {
    /// Creates a renderer using [`DEFAULT_DOCUMENT_TEMPLATE`].
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to register.
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_template(DEFAULT_DOCUMENT_TEMPLATE)
    }

    /// Creates a renderer from a template string.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not parse.
    pub fn with_template(template: &str) -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        // Markdown output, never HTML
        handlebars.register_escape_fn(no_escape);
        handlebars.set_strict_mode(true);
        handlebars.register_template_string(DOCUMENT_TEMPLATE_NAME, template)?;
        Ok(Self { handlebars })
    }

    /// Creates a renderer from a template file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let template = std::fs::read_to_string(path).map_err(|e| TemplateError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::with_template(&template)
    }

    /// Renders the whole README.
    ///
    /// The result always ends with exactly one newline.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails (e.g. the template references an
    /// unknown variable).
    pub fn render_document(
        &self,
        header: &str,
        entries: &[AppEntry],
        updated: DateTime<Utc>,
    ) -> Result<String, TemplateError> {
        let apps: Vec<_> = entries
            .iter()
            .map(|entry| {
                json!({
                    "name": entry.name,
                    "url": entry.url,
                    "description": entry.description,
                    "bullet": format_bullet(entry),
                })
            })
            .collect();

        let data = json!({
            "header": header.trim_end(),
            "apps": apps,
            "updated": StampStyle::Iso8601.format(updated),
            "footer": StampStyle::Iso8601.footer(updated),
        });

        let rendered = self.handlebars.render(DOCUMENT_TEMPLATE_NAME, &data)?;
        Ok(format!("{}\n", rendered.trim_end()))
    }

    /// Renders the README, keeping the timestamp already in `existing` when
    /// nothing else would change.
    ///
    /// Any ISO-8601 timestamp in `existing` is tried, so templates that print
    /// `{{updated}}` instead of `{{footer}}` stay idempotent too.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn regenerate_document(
        &self,
        header: &str,
        entries: &[AppEntry],
        existing: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, TemplateError> {
        if let Some(existing) = existing {
            for previous in StampStyle::Iso8601.scan(existing).into_iter().rev() {
                let candidate = self.render_document(header, entries, previous)?;
                if candidate == existing {
                    return Ok(candidate);
                }
            }
        }
        self.render_document(header, entries, now)
    }
}
