//! Splicing a regenerated Apps section into an existing README.
//!
//! A README is split into three disjoint runs of lines: the preamble before
//! `## Apps`, the Apps section itself, and the community section starting at
//! `## Community Apps`. Only the middle part is ever replaced.

use crate::content::{build_apps_section, StampStyle, APPS_HEADING};
use crate::listing::AppEntry;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Heading of the hand-maintained section kept after the generated one.
pub const COMMUNITY_HEADING: &str = "## Community Apps";

/// Lines of a README split around the generated section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sections {
    /// Lines before the `## Apps` heading.
    pub preamble: Vec<String>,
    /// The current Apps section, heading included.
    pub apps: Vec<String>,
    /// Lines from the `## Community Apps` heading onward.
    pub community: Vec<String>,
    /// Whether the `## Apps` heading was found at all.
    pub has_apps_section: bool,
}

fn is_heading(line: &str, heading: &str) -> bool {
    line.trim() == heading
}

/// Splits README lines into preamble, Apps section and community section.
///
/// Without an `## Apps` heading the whole document is preamble. The community
/// heading only counts when it comes after the Apps heading.
pub fn split_sections<S: AsRef<str>>(lines: &[S]) -> Sections {
    let owned = |slice: &[S]| -> Vec<String> {
        slice.iter().map(|l| l.as_ref().to_string()).collect()
    };

    let Some(apps_idx) = lines.iter().position(|l| is_heading(l.as_ref(), APPS_HEADING)) else {
        return Sections {
            preamble: owned(lines),
            ..Sections::default()
        };
    };

    let community_idx = lines[apps_idx + 1..]
        .iter()
        .position(|l| is_heading(l.as_ref(), COMMUNITY_HEADING))
        .map_or(lines.len(), |offset| apps_idx + 1 + offset);

    Sections {
        preamble: owned(&lines[..apps_idx]),
        apps: owned(&lines[apps_idx..community_idx]),
        community: owned(&lines[community_idx..]),
        has_apps_section: true,
    }
}

/// Joins lines and normalizes the ending to a single trailing newline.
#[must_use]
pub fn join_normalized<S: AsRef<str>>(lines: &[S]) -> String {
    let joined = lines
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<&str>>()
        .join("\n");
    format!("{}\n", joined.trim_end())
}

/// A README fetched from the directory repository.
#[derive(Debug, Clone)]
pub struct ReadmeDocument {
    sections: Sections,
    normalized: String,
    sha: String,
}

impl ReadmeDocument {
    /// Parses README text; `sha` is the blob version it was fetched at.
    pub fn parse(text: &str, sha: impl Into<String>) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        Self {
            sections: split_sections(&lines),
            normalized: join_normalized(&lines),
            sha: sha.into(),
        }
    }

    /// Returns the blob sha used for the conditional update.
    #[must_use]
    pub fn sha(&self) -> &str {
        &self.sha
    }

    /// Returns the split sections.
    #[must_use]
    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    /// Returns the original text with normalized line endings.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Returns the timestamp of the current Apps section footer, if any.
    #[must_use]
    pub fn previous_stamp(&self) -> Option<DateTime<Utc>> {
        StampStyle::Human.find_in(self.sections.apps.iter().map(String::as_str))
    }

    /// Reassembles the README with `apps_lines` in place of the Apps section.
    ///
    /// A README without an Apps heading is returned unchanged.
    #[must_use]
    pub fn splice(&self, apps_lines: &[String]) -> String {
        if !self.sections.has_apps_section {
            return self.normalized.clone();
        }

        let lines: Vec<&str> = self
            .sections
            .preamble
            .iter()
            .chain(apps_lines)
            .chain(&self.sections.community)
            .map(String::as_str)
            .collect();
        join_normalized(&lines)
    }

    /// Builds the new README text for `entries`.
    ///
    /// If the current footer timestamp already yields the current text, that text
    /// is kept so an unchanged listing never causes a write.
    #[must_use]
    pub fn regenerate(&self, entries: &[AppEntry], now: DateTime<Utc>) -> String {
        if let Some(previous) = self.previous_stamp() {
            let candidate = self.splice(&build_apps_section(entries, previous));
            if self.is_unchanged(&candidate) {
                debug!(stamp = %previous, "Apps section unchanged, keeping timestamp");
                return candidate;
            }
        }
        self.splice(&build_apps_section(entries, now))
    }

    /// Returns true if `new_text` is byte-for-byte the current README.
    #[must_use]
    pub fn is_unchanged(&self, new_text: &str) -> bool {
        new_text == self.normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, hour, 0, 0).unwrap()
    }

    fn apps() -> Vec<AppEntry> {
        vec![
            AppEntry::new("App-A", "https://github.com/acme/App-A", "First"),
            AppEntry::new("App-b", "https://github.com/acme/App-b", ""),
        ]
    }

    #[test]
    fn splits_three_sections() {
        let sections = split_sections(&["A", "## Apps", "B", "## Community Apps", "C"]);

        assert_eq!(sections.preamble, vec!["A"]);
        assert_eq!(sections.apps, vec!["## Apps", "B"]);
        assert_eq!(sections.community, vec!["## Community Apps", "C"]);
        assert!(sections.has_apps_section);
    }

    #[test]
    fn splits_without_community_section() {
        let sections = split_sections(&["A", "## Apps", "B"]);

        assert_eq!(sections.preamble, vec!["A"]);
        assert_eq!(sections.apps, vec!["## Apps", "B"]);
        assert!(sections.community.is_empty());
    }

    #[test]
    fn community_heading_before_apps_is_preamble() {
        let sections = split_sections(&["## Community Apps", "X", "## Apps", "B"]);

        assert_eq!(sections.preamble, vec!["## Community Apps", "X"]);
        assert!(sections.community.is_empty());
    }

    #[test]
    fn headings_match_after_trimming() {
        let sections = split_sections(&["A", "  ## Apps ", "B", "## Community Apps\t"]);
        assert_eq!(sections.preamble, vec!["A"]);
        assert_eq!(sections.community, vec!["## Community Apps\t"]);
    }

    #[test]
    fn splice_replaces_only_apps_section() {
        let doc = ReadmeDocument::parse("A\n## Apps\nB\n## Community Apps\nC\n", "sha1");

        let result = doc.splice(&build_apps_section(&apps(), at(9)));

        assert_eq!(
            result,
            "A\n\
             ## Apps\n\
             \n\
             - [App-A](https://github.com/acme/App-A) — First\n\
             - [App-b](https://github.com/acme/App-b)\n\
             \n\
             _Last updated: 2026-10-18 09:00 UTC_\n\
             \n\
             ## Community Apps\n\
             C\n"
        );
        assert!(!result.contains("\nB\n"));
        assert_eq!(doc.sha(), "sha1");
    }

    #[test]
    fn splice_trims_trailing_whitespace() {
        let doc = ReadmeDocument::parse("A\n## Apps\nB\n", "sha");
        let result = doc.splice(&build_apps_section(&[], at(9)));
        assert!(result.ends_with("_Last updated: 2026-10-18 09:00 UTC_\n"));
    }

    #[test]
    fn document_without_apps_heading_is_unchanged() {
        let text = "# Directory\n\nNothing generated here.\n";
        let doc = ReadmeDocument::parse(text, "sha");

        let result = doc.regenerate(&apps(), at(9));

        assert_eq!(result, text);
        assert!(doc.is_unchanged(&result));
    }

    #[test]
    fn regenerate_is_idempotent() {
        let doc = ReadmeDocument::parse("# Directory\n\n## Apps\n\nold\n", "sha");
        let first = doc.regenerate(&apps(), at(9));
        assert!(!doc.is_unchanged(&first));

        let updated = ReadmeDocument::parse(&first, "sha2");
        let second = updated.regenerate(&apps(), at(17));

        assert_eq!(second, first);
        assert!(updated.is_unchanged(&second));
    }

    #[test]
    fn regenerate_restamps_when_listing_changes() {
        let doc = ReadmeDocument::parse("# Directory\n\n## Apps\n\nold\n", "sha");
        let first = ReadmeDocument::parse(&doc.regenerate(&apps(), at(9)), "sha2");

        let mut more = apps();
        more.push(AppEntry::new("App-c", "https://github.com/acme/App-c", ""));
        let second = first.regenerate(&more, at(17));

        assert!(second.contains("- [App-c](https://github.com/acme/App-c)"));
        assert!(second.contains("_Last updated: 2026-10-18 17:00 UTC_"));
        assert!(!first.is_unchanged(&second));
    }

    #[test]
    fn comparison_ignores_crlf_and_missing_newline() {
        let doc = ReadmeDocument::parse("A\r\n## Apps\r\nB", "sha");
        assert_eq!(doc.normalized(), "A\n## Apps\nB\n");
    }
}
