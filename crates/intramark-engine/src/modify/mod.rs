//! The final pass: rewrites every line according to the requested operations.
//!
//! Per line, in order:
//!
//! 1. a consumed reference definition line is dropped (unless preserved)
//! 2. reference-style links are rewritten inline
//! 3. heading markup is shifted, equalised, annotated or stripped
//! 4. a hard line break's trailing spaces are removed
//!
//! Every emitted line ends with exactly one `\n`.

pub mod edits;
pub mod heading;
pub mod links;

use crate::analysis::DocumentMarkup;
use crate::document::SourceDocument;
use crate::operations::OperationSet;
use crate::resolve::ReferenceLinkTable;

pub use edits::{LineEdits, Replacement};
pub use heading::{LevelAdjustment, rewrite_heading};
pub use links::inline_link_edits;

/// Rewrites `doc` and returns the new text.
///
/// `links` is only consulted when `ops` asks for inline links.
pub fn modify(
    doc: &SourceDocument,
    markup: &DocumentMarkup,
    links: Option<&ReferenceLinkTable>,
    ops: &OperationSet,
) -> String {
    let links = links.filter(|table| ops.modifies_links() && !table.is_empty());
    let adjustment = LevelAdjustment::resolve(ops.heading_shift, &markup.summary);
    log::debug!("heading level adjustment: {adjustment:?}");

    let mut out = String::with_capacity(doc.raw().len() + 64);
    let mut deleted = 0;
    let mut rewritten_links = 0;

    for (number, line) in doc.numbered_lines() {
        if let Some(table) = links
            && table.consumes_definition(number)
            && !ops.preserve_reference_definitions
        {
            deleted += 1;
            continue;
        }

        let edits = links
            .map(|table| inline_link_edits(table, number))
            .unwrap_or_default();
        rewritten_links += edits.len();
        let mut current = edits.apply(line);

        if ops.modifies_headings()
            && let Some(record) = markup.heading(number)
        {
            let content = edits.rebased(record.content_offset).apply(&record.content);
            current = rewrite_heading(&current, record, adjustment, ops, &content);
        }

        if ops.strip_line_breaks
            && let Some(hard_break) = markup.hard_break(number)
        {
            current.truncate(current.len() - hard_break.trailing_space_count);
        }

        out.push_str(&current);
        out.push('\n');
    }

    if rewritten_links > 0 || deleted > 0 {
        log::debug!(
            "rewrote {rewritten_links} links inline, removed {deleted} reference definition lines"
        );
    }
    out
}
