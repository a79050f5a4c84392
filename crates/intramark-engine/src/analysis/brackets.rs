use serde::Serialize;

use super::cursor::Cursor;

/// The longest label text accepted between a pair of brackets.
pub const MAX_LABEL_CHARS: usize = 999;

/// A matched `[`...`]` pair on one line.
///
/// Both indices are zero-based character offsets of the brackets themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BracketSpan {
    pub left: usize,
    pub right: usize,
}

impl BracketSpan {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Number of characters strictly between the brackets.
    pub fn interior_len(self) -> usize {
        self.right.saturating_sub(self.left + 1)
    }

    /// The text strictly between the brackets.
    pub fn interior(self, chars: &[char]) -> String {
        chars
            .get(self.left + 1..self.right)
            .map(|inner| inner.iter().collect())
            .unwrap_or_default()
    }

    /// Offset of the character right after the closing bracket.
    pub fn after(self) -> usize {
        self.right + 1
    }
}

/// Finds every bracket span on a line.
///
/// A `[` or `]` preceded by a backslash is ignored, and a `]` in the first
/// column never closes anything. When several `[` are open, the one nearest
/// the closing `]` wins; brackets are not nested. A span is emitted once its
/// interior holds at least one non-space character and no more than
/// [`MAX_LABEL_CHARS`] characters, after which scanning continues for further
/// spans on the same line.
pub fn scan_bracket_spans(chars: &[char]) -> Vec<BracketSpan> {
    let mut cur = Cursor::new(chars);
    let mut spans: Vec<BracketSpan> = Vec::new();
    let mut left: Option<usize> = None;
    let mut right: Option<usize> = None;

    while let Some(c) = cur.peek() {
        let pos = cur.pos();
        let escaped = cur.prev() == Some('\\');
        match c {
            ']' if pos > 0 && !escaped => right = Some(pos),
            '[' if !escaped => left = Some(pos),
            _ => {}
        }

        if let (Some(l), Some(r)) = (left, right) {
            let span = BracketSpan::new(l, r);
            if r > l + 1
                && span.interior_len() <= MAX_LABEL_CHARS
                && chars[l + 1..r].iter().any(|&c| c != ' ')
            {
                if !spans.contains(&span) {
                    spans.push(span);
                }
                left = None;
                right = None;
            }
        }
        cur.bump();
    }

    spans
}
