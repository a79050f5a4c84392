use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Heading metadata for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingRecord {
    /// Spaces before the opening `#` run (1-3), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_space_count: Option<usize>,
    /// Length of the opening `#` run, always in `1..=6`.
    pub leading_hash_count: usize,
    pub content: String,
    /// Length of the closing `#` run, if the line has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_hash_count: Option<usize>,
    /// Spaces after the closing `#` run, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_space_count: Option<usize>,
    /// Character offset of `content` within the line.
    #[serde(skip)]
    pub content_offset: usize,
}

/// Matches an ATX heading line.
///
/// The opening run is 1-6 `#` followed by a space or the end of the line.
/// A run of seven or more `#` takes the second branch: the first six are the
/// marker and the rest becomes content. That branch also accepts six `#`
/// followed by any other character, which [`HeadingRecord::detect`] rejects.
/// The closing run is optional and must be preceded by exactly one space
/// inside the match.
fn heading_regex() -> &'static Regex {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
    HEADING_REGEX.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<leading_spaces> {1,3})?",
            r"(?:(?P<hashes>#{1,6})(?:$| )|(?P<overflow_hashes>#{6}))",
            r"(?P<content>.*?)",
            r"(?: (?P<trailing_hashes>#+)(?P<trailing_spaces> +)?)?$",
        ))
        .expect("Invalid heading regex")
    })
}

impl HeadingRecord {
    /// Detects a heading on `line`, returning `None` for any other line.
    pub fn detect(line: &str) -> Option<Self> {
        let caps = heading_regex().captures(line)?;
        let hashes = caps
            .name("hashes")
            .or_else(|| caps.name("overflow_hashes"))?;
        let content = caps.name("content")?;
        // Six hashes glued to content are only a marker when a seventh follows.
        if caps.name("overflow_hashes").is_some() && !content.as_str().starts_with('#') {
            return None;
        }

        Some(Self {
            leading_space_count: caps.name("leading_spaces").map(|m| m.len()),
            leading_hash_count: hashes.len(),
            content: content.as_str().to_string(),
            trailing_hash_count: caps.name("trailing_hashes").map(|m| m.len()),
            trailing_space_count: caps.name("trailing_spaces").map(|m| m.len()),
            content_offset: line[..content.start()].chars().count(),
        })
    }

    pub fn level(&self) -> usize {
        self.leading_hash_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", 1, "Title")]
    #[case("###### Deep", 6, "Deep")]
    #[case("#", 1, "")]
    #[case("## ", 2, "")]
    #[case("## heading  ", 2, "heading  ")]
    #[case("####### content", 6, "# content")]
    fn detects_level_and_content(
        #[case] line: &str,
        #[case] level: usize,
        #[case] content: &str,
    ) {
        let heading = HeadingRecord::detect(line).unwrap();
        assert_eq!(heading.level(), level);
        assert_eq!(heading.content, content);
    }

    #[rstest]
    #[case("#hashtag")]
    #[case("    # four spaces is code")]
    #[case("plain text")]
    #[case("")]
    #[case("#5 not a heading")]
    #[case("######glued")]
    fn rejects_non_headings(#[case] line: &str) {
        assert_eq!(HeadingRecord::detect(line), None);
    }

    #[test]
    fn records_leading_spaces() {
        let heading = HeadingRecord::detect("   ## Indented").unwrap();
        assert_eq!(heading.leading_space_count, Some(3));
        assert_eq!(heading.leading_hash_count, 2);
        assert_eq!(heading.content, "Indented");
        assert_eq!(heading.content_offset, 6);
    }

    #[test]
    fn records_closing_sequence() {
        let heading = HeadingRecord::detect("## Title ####  ").unwrap();
        assert_eq!(heading.content, "Title");
        assert_eq!(heading.trailing_hash_count, Some(4));
        assert_eq!(heading.trailing_space_count, Some(2));
        assert_eq!(heading.leading_space_count, None);
    }

    #[test]
    fn trailing_spaces_without_closing_hashes_stay_in_content() {
        let heading = HeadingRecord::detect("# Title   ").unwrap();
        assert_eq!(heading.content, "Title   ");
        assert_eq!(heading.trailing_hash_count, None);
        assert_eq!(heading.trailing_space_count, None);
    }

    #[test]
    fn hash_glued_to_content_is_not_a_closing_sequence() {
        let heading = HeadingRecord::detect("# C#").unwrap();
        assert_eq!(heading.content, "C#");
        assert_eq!(heading.trailing_hash_count, None);
    }

    #[test]
    fn content_offset_counts_characters() {
        let heading = HeadingRecord::detect("# Überschrift").unwrap();
        assert_eq!(heading.content_offset, 2);
        assert_eq!(heading.content, "Überschrift");
    }
}
