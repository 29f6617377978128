//! "Last updated" footer timestamps.

use chrono::{DateTime, NaiveDateTime, Utc};

const FOOTER_OPEN: &str = "_Last updated: ";
const FOOTER_CLOSE: &str = "_";

/// How the footer renders its UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampStyle {
    /// `2026-10-18 09:30 UTC`, used inside a spliced Apps section.
    Human,

    /// `2026-10-18T09:30:00Z`, used by fully generated documents.
    Iso8601,
}

impl StampStyle {
    fn pattern(self) -> &'static str {
        match self {
            Self::Human => "%Y-%m-%d %H:%M UTC",
            Self::Iso8601 => "%Y-%m-%dT%H:%M:%SZ",
        }
    }

    /// Length of a formatted timestamp.
    fn width(self) -> usize {
        match self {
            Self::Human => "2026-01-01 00:00 UTC".len(),
            Self::Iso8601 => "2026-01-01T00:00:00Z".len(),
        }
    }

    /// Formats a timestamp.
    #[must_use]
    pub fn format(self, at: DateTime<Utc>) -> String {
        at.format(self.pattern()).to_string()
    }

    /// Parses a timestamp previously produced by [`StampStyle::format`].
    #[must_use]
    pub fn parse(self, text: &str) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(text.trim(), self.pattern())
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Renders the full footer line.
    #[must_use]
    pub fn footer(self, at: DateTime<Utc>) -> String {
        format!("{FOOTER_OPEN}{}{FOOTER_CLOSE}", self.format(at))
    }

    /// Returns every distinct timestamp of this style appearing anywhere in
    /// `text`, in order of first appearance.
    #[must_use]
    pub fn scan(self, text: &str) -> Vec<DateTime<Utc>> {
        let width = self.width();
        let mut found = Vec::new();
        let mut previous = None;

        for (start, c) in text.char_indices() {
            let after_digit = previous.is_some_and(|p: char| p.is_ascii_digit());
            previous = Some(c);
            if !c.is_ascii_digit() || after_digit {
                continue;
            }

            let parsed = text
                .get(start..start + width)
                .and_then(|window| self.parse(window));
            if let Some(at) = parsed {
                if !found.contains(&at) {
                    found.push(at);
                }
            }
        }

        found
    }

    /// Finds the last footer line in `lines` and returns its timestamp.
    pub fn find_in<'a, I>(self, lines: I) -> Option<DateTime<Utc>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .filter_map(|line| {
                line.trim()
                    .strip_prefix(FOOTER_OPEN)?
                    .strip_suffix(FOOTER_CLOSE)
            })
            .filter_map(|stamp| self.parse(stamp))
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
    }

    #[test]
    fn formats_both_styles() {
        assert_eq!(StampStyle::Human.format(at()), "2026-10-18 09:30 UTC");
        assert_eq!(StampStyle::Iso8601.format(at()), "2026-10-18T09:30:00Z");
        assert_eq!(
            StampStyle::Human.footer(at()),
            "_Last updated: 2026-10-18 09:30 UTC_"
        );
    }

    #[test]
    fn finds_footer_timestamp() {
        let doc = "# Title\n\n- [App-a](u)\n\n_Last updated: 2026-10-18T09:30:00Z_\n";
        assert_eq!(StampStyle::Iso8601.find_in(doc.lines()), Some(at()));
        // Wrong style does not parse.
        assert_eq!(StampStyle::Human.find_in(doc.lines()), None);
    }

    #[test]
    fn scans_timestamps_anywhere() {
        let later = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        let text = "Built 2026-10-18T09:30:00Z (again 2026-10-18T09:30:00Z),\n\
                    next 2026-10-19T00:00:00Z; not 12026-10-18T09:30:00Z";

        assert_eq!(StampStyle::Iso8601.scan(text), vec![at(), later]);
        assert!(StampStyle::Human.scan(text).is_empty());
        assert_eq!(
            StampStyle::Human.scan("at 2026-10-18 09:30 UTC."),
            vec![at()]
        );
    }

    #[test]
    fn ignores_documents_without_footer() {
        assert_eq!(StampStyle::Human.find_in("# Title\n".lines()), None);
        assert_eq!(
            StampStyle::Human.find_in(["_Last updated: yesterday_"]),
            None
        );
    }
}
