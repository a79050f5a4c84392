//! Classification of the bracket spans found on a single line.
//!
//! Every span starts out as a potential label and is claimed, in order, by
//! the first construct that fits:
//!
//! 1. footnote label (`[^...]`)
//! 2. footnote definition (a lone footnote label at column 0 followed by `:`)
//! 3. inline link (`[...]` followed by `(` ... `)`)
//! 4. reference definition (a lone remaining span at column 0 followed by `:`
//!    and a URI)
//!
//! Each check only sees the spans left over by the checks before it. Whatever
//! survives stays a potential label.

use serde::Serialize;

use super::{brackets::BracketSpan, cursor::Cursor};

/// A bracket span not claimed by any other construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PotentialLabel {
    #[serde(flatten)]
    pub span: BracketSpan,
    /// The text between the brackets. Only extracted when the document also
    /// holds reference definitions it could match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
}

impl PotentialLabel {
    pub fn new(span: BracketSpan) -> Self {
        Self {
            span,
            normalized: None,
        }
    }
}

/// `[^label]: body` at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FootnoteDefinition {
    #[serde(flatten)]
    pub span: BracketSpan,
    pub body_start: usize,
    pub body_end: usize,
}

/// `[text](destination)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InlineLink {
    #[serde(flatten)]
    pub span: BracketSpan,
    pub left_paren: usize,
    pub right_paren: usize,
}

/// `[label]: uri` at the start of a line.
///
/// The URI must be a single run of non-space characters reaching the end of
/// the line, so titled definitions are not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceDefinition {
    #[serde(flatten)]
    pub span: BracketSpan,
    pub inter_colon_space_count: usize,
    pub uri_start: usize,
    /// Exclusive.
    pub uri_end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// All link constructs found on one line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineLinks {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub potential_labels: Vec<PotentialLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub footnote_labels: Vec<BracketSpan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footnote_definition: Option<FootnoteDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inline_links: Vec<InlineLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_definition: Option<ReferenceDefinition>,
}

impl LineLinks {
    pub fn is_empty(&self) -> bool {
        self.potential_labels.is_empty()
            && self.footnote_labels.is_empty()
            && self.footnote_definition.is_none()
            && self.inline_links.is_empty()
            && self.reference_definition.is_none()
    }
}

/// Classifies the spans found on a line.
pub fn classify_spans(chars: &[char], spans: Vec<BracketSpan>) -> LineLinks {
    let mut links = LineLinks::default();

    let (footnote_labels, mut potential): (Vec<_>, Vec<_>) = spans
        .into_iter()
        .partition(|span| chars.get(span.left + 1) == Some(&'^'));
    links.footnote_labels = footnote_labels;

    if let [only] = links.footnote_labels.as_slice()
        && only.left == 0
        && let Some(definition) = footnote_definition(chars, *only)
    {
        links.footnote_definition = Some(definition);
        links.footnote_labels.clear();
    }

    potential.retain(|span| match inline_link(chars, *span) {
        Some(link) => {
            links.inline_links.push(link);
            false
        }
        None => true,
    });

    if let [only] = potential.as_slice()
        && only.left == 0
        && let Some(definition) = reference_definition(chars, *only)
    {
        links.reference_definition = Some(definition);
        potential.clear();
    }

    links.potential_labels = potential.into_iter().map(PotentialLabel::new).collect();
    links
}

fn footnote_definition(chars: &[char], span: BracketSpan) -> Option<FootnoteDefinition> {
    let colon = span.after();
    if chars.get(colon) != Some(&':') || chars.len() <= colon + 1 {
        return None;
    }
    Some(FootnoteDefinition {
        span,
        body_start: colon + 1,
        body_end: chars.len(),
    })
}

fn inline_link(chars: &[char], span: BracketSpan) -> Option<InlineLink> {
    let left_paren = span.after();
    if chars.get(left_paren) != Some(&'(') {
        return None;
    }
    let right_paren = Cursor::at(chars, left_paren + 1).find(')')?;
    (right_paren > left_paren).then_some(InlineLink {
        span,
        left_paren,
        right_paren,
    })
}

fn reference_definition(chars: &[char], span: BracketSpan) -> Option<ReferenceDefinition> {
    let colon = span.after();
    if chars.get(colon) != Some(&':') {
        return None;
    }

    let mut cur = Cursor::at(chars, colon + 1);
    let inter_colon_space_count = cur.eat_while(|c| c == ' ');
    let uri_start = cur.pos();
    let uri = cur.rest();
    if uri.is_empty() || uri.contains(&' ') {
        return None;
    }

    Some(ReferenceDefinition {
        span,
        inter_colon_space_count,
        uri_start,
        uri_end: chars.len(),
        normalized_label: None,
        uri: None,
    })
}
