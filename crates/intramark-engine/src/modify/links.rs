use crate::resolve::{ReferenceLinkKind, ReferenceLinkTable};

use super::edits::LineEdits;

/// Builds the edits that turn every reference-style link on `line` into an
/// inline link.
pub fn inline_link_edits(table: &ReferenceLinkTable, line: usize) -> LineEdits {
    let mut edits = LineEdits::new();
    for link in table.links_on_line(line) {
        let destination = format!("({})", link.uri);
        let label = link.label_span;
        match link.kind {
            // [label] -> [label](uri)
            ReferenceLinkKind::Shortcut => edits.insert(label.after(), destination),
            // [label][] -> [label](uri)
            ReferenceLinkKind::Collapsed => {
                edits.replace(label.after(), label.after() + 2, destination)
            }
            // [text][label] -> [text](uri)
            ReferenceLinkKind::Full { .. } => {
                edits.replace(label.left, label.after(), destination)
            }
        }
    }
    edits
}
