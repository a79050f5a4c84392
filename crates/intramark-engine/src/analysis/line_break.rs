use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// A hard line break: a non-space character followed by two or more spaces
/// at the end of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HardBreakRecord {
    pub trailing_space_count: usize,
}

fn hard_break_regex() -> &'static Regex {
    static HARD_BREAK_REGEX: OnceLock<Regex> = OnceLock::new();
    HARD_BREAK_REGEX
        .get_or_init(|| Regex::new(r"\S(?P<spaces> {2,})$").expect("Invalid hard break regex"))
}

impl HardBreakRecord {
    /// Detects a hard line break on `line`.
    ///
    /// This does not know about headings; the analyzer only asks after the
    /// heading check has failed.
    pub fn detect(line: &str) -> Option<Self> {
        let caps = hard_break_regex().captures(line)?;
        Some(Self {
            trailing_space_count: caps.name("spaces")?.len(),
        })
    }
}
