/// Replace the characters in `start..end` with `text`.
///
/// Offsets are character offsets into the unedited line. An empty range is an
/// insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// A set of non-overlapping replacements for a single line.
///
/// All offsets refer to the original line, so edits can be collected in any
/// order and applied in one pass without tracking how earlier edits shifted
/// later positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEdits {
    replacements: Vec<Replacement>,
}

impl LineEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.replace(at, at, text);
    }

    /// Queues a replacement. One that overlaps an already queued replacement
    /// is dropped with a warning.
    pub fn replace(&mut self, start: usize, end: usize, text: impl Into<String>) {
        let candidate = Replacement {
            start,
            end: end.max(start),
            text: text.into(),
        };
        if let Some(existing) = self.replacements.iter().find(|r| overlaps(r, &candidate)) {
            log::warn!(
                "skipping edit at {}..{}: overlaps edit at {}..{}",
                candidate.start,
                candidate.end,
                existing.start,
                existing.end
            );
            return;
        }
        self.replacements.push(candidate);
    }

    /// The same edits expressed relative to `offset`. Edits that start before
    /// `offset` are dropped.
    pub fn rebased(&self, offset: usize) -> Self {
        Self {
            replacements: self
                .replacements
                .iter()
                .filter(|r| r.start >= offset)
                .map(|r| Replacement {
                    start: r.start - offset,
                    end: r.end - offset,
                    text: r.text.clone(),
                })
                .collect(),
        }
    }

    /// Applies every edit to `line`. Edits past the end of the line are
    /// clamped to it.
    pub fn apply(&self, line: &str) -> String {
        if self.is_empty() {
            return line.to_string();
        }

        let mut ordered: Vec<&Replacement> = self.replacements.iter().collect();
        ordered.sort_by_key(|r| (r.start, r.end));

        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(line.len() + 32);
        let mut pos = 0;
        for r in ordered {
            let start = r.start.min(chars.len());
            let end = r.end.min(chars.len());
            out.extend(&chars[pos..start]);
            out.push_str(&r.text);
            pos = end;
        }
        out.extend(&chars[pos..]);
        out
    }
}

/// Two ranges overlap when they share a character, or when they are the same
/// insertion point.
fn overlaps(a: &Replacement, b: &Replacement) -> bool {
    if a.start == a.end || b.start == b.end {
        return a.start == b.start || (a.start < b.end && b.start < a.end);
    }
    a.start < b.end && b.start < a.end
}
