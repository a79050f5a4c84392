/// An input document held in memory for the duration of a run.
///
/// Every pass walks the same line list, so line numbers handed out by one
/// pass are valid for the others. The raw text is kept so that a run with
/// nothing to modify can emit the input byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    raw: String,
    lines: Vec<String>,
}

impl SourceDocument {
    /// Create a document from text, stripping line terminators.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let lines = raw.lines().map(str::to_string).collect();
        Self { raw, lines }
    }

    /// The original text, exactly as it was read.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line by its 1-based number.
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(String::as_str)
    }

    /// Iterate over `(line_number, line)` pairs, numbering from 1.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, line)| (index + 1, line.as_str()))
    }
}

impl From<&str> for SourceDocument {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SourceDocument {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
