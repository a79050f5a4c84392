use serde::Serialize;

/// The deepest heading level Markdown allows.
pub const MAX_HEADING_LEVEL: usize = 6;

/// A requested change to the overall heading level of a document.
///
/// Numeric amounts are expected in `1..=5`; range checking belongs to
/// whoever builds the [`OperationSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadingShift {
    /// Shift every heading up until the shallowest one is level 1.
    DecreaseMax,
    /// Shift every heading down until the deepest one is level 6.
    IncreaseMax,
    DecreaseBy(usize),
    IncreaseBy(usize),
}

/// Which heading markup to strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadingMarkupStrip {
    /// Replace the whole heading line with its content.
    All,
    /// Remove the closing `#` run, its leading space and any trailing spaces.
    TrailingHashes,
}

/// The set of modifications requested for one run.
///
/// Immutable for the duration of a run. The default value requests nothing,
/// which makes a run a verbatim pass-through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperationSet {
    pub heading_shift: Option<HeadingShift>,
    pub equalize_trailing_hashes: bool,
    pub strip_heading_markup: Option<HeadingMarkupStrip>,
    pub annotate_headings: bool,
    pub strip_line_breaks: bool,
    pub make_links_inline: bool,
    /// Keep reference definition lines when links are made inline.
    pub preserve_reference_definitions: bool,
}

impl OperationSet {
    pub fn modifies_headings(&self) -> bool {
        self.heading_shift.is_some()
            || self.equalize_trailing_hashes
            || self.strip_heading_markup.is_some()
            || self.annotate_headings
    }

    pub fn modifies_line_breaks(&self) -> bool {
        self.strip_line_breaks
    }

    pub fn modifies_links(&self) -> bool {
        self.make_links_inline
    }

    pub fn has_modification(&self) -> bool {
        self.modifies_headings() || self.modifies_line_breaks() || self.modifies_links()
    }
}
