//! Reference-style link resolution.
//!
//! Matches potential labels against reference definitions and works out
//! which of the three reference-link shapes each match is:
//!
//! - shortcut: `[label]`
//! - collapsed: `[label][]`
//! - full: `[text][label]`
//!
//! The markup index is only read. Everything derived here lives in a
//! separate [`ReferenceLinkTable`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::analysis::{BracketSpan, DocumentMarkup, PotentialLabel};
use crate::document::SourceDocument;

/// The shape of a resolved reference-style link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceLinkKind {
    Shortcut,
    Collapsed,
    Full {
        link_text: String,
        link_text_span: BracketSpan,
    },
}

/// A potential label that matched a reference definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceStyleLink {
    pub line: usize,
    pub label_span: BracketSpan,
    pub normalized_label: String,
    pub definition_line: usize,
    pub uri: String,
    pub inter_colon_space_count: usize,
    #[serde(flatten)]
    pub kind: ReferenceLinkKind,
}

/// Every reference-style link in a document, plus what was left over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceLinkTable {
    /// In document order.
    pub links: Vec<ReferenceStyleLink>,
    /// Lines holding a definition that some link consumed.
    pub consumed_definition_lines: BTreeSet<usize>,
    /// Potential labels that are neither a link nor the text of a full link.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub unresolved_labels: BTreeMap<usize, Vec<PotentialLabel>>,
}

impl ReferenceLinkTable {
    pub fn links_on_line(&self, line: usize) -> impl Iterator<Item = &ReferenceStyleLink> {
        self.links.iter().filter(move |link| link.line == line)
    }

    pub fn consumes_definition(&self, line: usize) -> bool {
        self.consumed_definition_lines.contains(&line)
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

struct OpenDefinition<'a> {
    line: usize,
    label: &'a str,
    uri: &'a str,
    inter_colon_space_count: usize,
}

/// Resolves the reference-style links of `doc`.
///
/// Labels are compared with the definition labels by exact, case-sensitive
/// string equality. Each definition is consumed by the first label that
/// matches it, so a repeated label only resolves once.
pub fn resolve_reference_links(doc: &SourceDocument, markup: &DocumentMarkup) -> ReferenceLinkTable {
    let mut table = ReferenceLinkTable::default();

    let mut open: Vec<OpenDefinition> = markup
        .reference_definitions()
        .filter_map(|(line, definition)| {
            Some(OpenDefinition {
                line,
                label: definition.normalized_label.as_deref()?,
                uri: definition.uri.as_deref()?,
                inter_colon_space_count: definition.inter_colon_space_count,
            })
        })
        .collect();

    for (line, label) in markup.potential_labels() {
        let matched = label
            .normalized
            .as_deref()
            .and_then(|text| open.iter().position(|d| d.label == text));

        match matched {
            Some(index) => {
                let definition = open.remove(index);
                table.consumed_definition_lines.insert(definition.line);
                table.links.push(ReferenceStyleLink {
                    line,
                    label_span: label.span,
                    normalized_label: definition.label.to_string(),
                    definition_line: definition.line,
                    uri: definition.uri.to_string(),
                    inter_colon_space_count: definition.inter_colon_space_count,
                    kind: ReferenceLinkKind::Shortcut,
                });
            }
            None => table
                .unresolved_labels
                .entry(line)
                .or_default()
                .push(label.clone()),
        }
    }

    mark_collapsed(doc, &mut table);
    mark_full(&mut table);

    log::debug!(
        "resolved {} reference links against {} definitions, {} labels unresolved",
        table.links.len(),
        table.consumed_definition_lines.len(),
        table.unresolved_labels.values().map(Vec::len).sum::<usize>()
    );

    table
}

/// A link whose label is followed directly by `[]` is collapsed.
fn mark_collapsed(doc: &SourceDocument, table: &mut ReferenceLinkTable) {
    for link in &mut table.links {
        let Some(line) = doc.line(link.line) else {
            continue;
        };
        let marker: Vec<char> = line.chars().skip(link.label_span.after()).take(2).collect();
        if marker == ['[', ']'] {
            link.kind = ReferenceLinkKind::Collapsed;
        }
    }
}

/// An unresolved label directly before a shortcut link's label on the same
/// line is that link's text, making it a full reference link.
fn mark_full(table: &mut ReferenceLinkTable) {
    for link in &mut table.links {
        if link.kind != ReferenceLinkKind::Shortcut {
            continue;
        }
        let Some(labels) = table.unresolved_labels.get_mut(&link.line) else {
            continue;
        };
        let Some(index) = labels
            .iter()
            .position(|label| label.span.after() == link.label_span.left)
        else {
            continue;
        };

        let text = labels.remove(index);
        link.kind = ReferenceLinkKind::Full {
            link_text: text.normalized.unwrap_or_default(),
            link_text_span: text.span,
        };
    }
    table.unresolved_labels.retain(|_, labels| !labels.is_empty());
}
