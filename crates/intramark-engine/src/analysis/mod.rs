//! # Markup Analysis
//!
//! A single forward pass over the document that builds a positional index of
//! headings, hard line breaks and link constructs, keyed by 1-based line
//! number.
//!
//! ## Modules
//!
//! - **`cursor`**: character cursor used by the line scanners
//! - **`brackets`**: `[`...`]` span scanning with backslash-escape awareness
//! - **`links`**: classification of spans into footnotes, inline links,
//!   reference definitions and potential labels
//! - **`heading`**: ATX heading detection
//! - **`line_break`**: hard line break detection
//!
//! ## Label extraction
//!
//! Label and URI text is pulled out in a second sub-pass, and only when the
//! document has both potential labels and reference definitions. The first
//! pass records indices only.

pub mod brackets;
pub mod cursor;
pub mod heading;
pub mod line_break;
pub mod links;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::document::SourceDocument;
use crate::operations::MAX_HEADING_LEVEL;

pub use brackets::{BracketSpan, scan_bracket_spans};
pub use heading::HeadingRecord;
pub use line_break::HardBreakRecord;
pub use links::{
    FootnoteDefinition, InlineLink, LineLinks, PotentialLabel, ReferenceDefinition, classify_spans,
};

/// Document-wide facts derived from the per-line records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkupSummary {
    pub at_least_one_heading_exists: bool,
    pub total_heading_count: usize,
    /// Deepest heading level present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_heading_number: Option<usize>,
    /// Shallowest heading level present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_heading_number: Option<usize>,
    pub at_least_one_hard_line_break_exists: bool,
    /// True when an inline link or a reference definition was found.
    pub at_least_one_link_exists: bool,
    pub at_least_one_footnote_definition_exists: bool,
}

/// The positional markup index for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentMarkup {
    pub headings: BTreeMap<usize, HeadingRecord>,
    pub hard_breaks: BTreeMap<usize, HardBreakRecord>,
    /// Only lines holding at least one link construct are present.
    pub links: BTreeMap<usize, LineLinks>,
    pub summary: MarkupSummary,
}

impl DocumentMarkup {
    pub fn heading(&self, line: usize) -> Option<&HeadingRecord> {
        self.headings.get(&line)
    }

    pub fn hard_break(&self, line: usize) -> Option<&HardBreakRecord> {
        self.hard_breaks.get(&line)
    }

    /// Every potential label in document order.
    pub fn potential_labels(&self) -> impl Iterator<Item = (usize, &PotentialLabel)> {
        self.links
            .iter()
            .flat_map(|(&line, links)| links.potential_labels.iter().map(move |l| (line, l)))
    }

    /// Every reference definition in document order.
    pub fn reference_definitions(&self) -> impl Iterator<Item = (usize, &ReferenceDefinition)> {
        self.links
            .iter()
            .filter_map(|(&line, links)| links.reference_definition.as_ref().map(|d| (line, d)))
    }

    fn summarize(&mut self) {
        let levels = || self.headings.values().map(HeadingRecord::level);
        let links = self.links.values();

        self.summary = MarkupSummary {
            at_least_one_heading_exists: !self.headings.is_empty(),
            total_heading_count: self.headings.len(),
            highest_heading_number: levels().max().map(|level| level.min(MAX_HEADING_LEVEL)),
            lowest_heading_number: levels().min(),
            at_least_one_hard_line_break_exists: !self.hard_breaks.is_empty(),
            at_least_one_link_exists: links
                .clone()
                .any(|l| !l.inline_links.is_empty() || l.reference_definition.is_some()),
            at_least_one_footnote_definition_exists: links
                .clone()
                .any(|l| l.footnote_definition.is_some()),
        };
    }
}

/// Scans `doc` once and builds its markup index.
pub fn analyze(doc: &SourceDocument) -> DocumentMarkup {
    let mut markup = DocumentMarkup::default();

    for (number, line) in doc.numbered_lines() {
        let chars: Vec<char> = line.chars().collect();
        let links = classify_spans(&chars, scan_bracket_spans(&chars));
        if !links.is_empty() {
            markup.links.insert(number, links);
        }

        // A heading line is never also a hard line break.
        if let Some(heading) = HeadingRecord::detect(line) {
            markup.headings.insert(number, heading);
        } else if let Some(hard_break) = HardBreakRecord::detect(line) {
            markup.hard_breaks.insert(number, hard_break);
        }
    }

    markup.summarize();

    if markup.potential_labels().next().is_some() && markup.reference_definitions().next().is_some()
    {
        extract_label_text(doc, &mut markup);
    }

    log::debug!(
        "analyzed {} lines: {} headings, {} hard breaks, {} lines with links",
        doc.line_count(),
        markup.headings.len(),
        markup.hard_breaks.len(),
        markup.links.len()
    );

    markup
}

/// Fills in the label text of potential labels and the label and URI text of
/// reference definitions from the recorded indices.
fn extract_label_text(doc: &SourceDocument, markup: &mut DocumentMarkup) {
    for (&number, links) in markup.links.iter_mut() {
        let Some(line) = doc.line(number) else {
            continue;
        };
        let chars: Vec<char> = line.chars().collect();

        for label in &mut links.potential_labels {
            label.normalized = Some(label.span.interior(&chars));
        }
        if let Some(definition) = &mut links.reference_definition {
            definition.normalized_label = Some(definition.span.interior(&chars));
            definition.uri = chars
                .get(definition.uri_start..definition.uri_end)
                .map(|uri| uri.iter().collect());
        }
    }
}
