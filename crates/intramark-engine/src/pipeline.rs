use crate::analysis::{DocumentMarkup, analyze};
use crate::diagnostic::DiagnosticReport;
use crate::document::SourceDocument;
use crate::modify::modify;
use crate::operations::OperationSet;
use crate::resolve::{ReferenceLinkTable, resolve_reference_links};

/// What a run produced for the output sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Nothing requested had markup to act on; emit the input as it was.
    Unchanged,
    Modified(String),
}

/// The result of running every pass over one document.
#[derive(Debug, Clone)]
pub struct Processed {
    pub markup: DocumentMarkup,
    pub reference_links: Option<ReferenceLinkTable>,
    pub output: Output,
}

impl Processed {
    /// The text to emit: the rewritten document, or the original text
    /// byte-for-byte when nothing was modified.
    pub fn text<'a>(&'a self, doc: &'a SourceDocument) -> &'a str {
        match &self.output {
            Output::Unchanged => doc.raw(),
            Output::Modified(text) => text,
        }
    }

    pub fn is_modified(&self) -> bool {
        matches!(self.output, Output::Modified(_))
    }

    pub fn diagnostic(&self) -> DiagnosticReport<'_> {
        DiagnosticReport::new(&self.markup, self.reference_links.as_ref())
    }
}

/// True when at least one requested modification has markup to work on.
pub fn has_markup_to_modify(markup: &DocumentMarkup, ops: &OperationSet) -> bool {
    let summary = &markup.summary;
    (ops.modifies_headings() && summary.at_least_one_heading_exists)
        || (ops.modifies_line_breaks() && summary.at_least_one_hard_line_break_exists)
        || (ops.modifies_links() && summary.at_least_one_link_exists)
}

/// Analyzes `doc`, resolves its reference links when inline links are
/// requested, and rewrites it when there is something to rewrite.
pub fn process(doc: &SourceDocument, ops: &OperationSet) -> Processed {
    let markup = analyze(doc);

    let reference_links = ops
        .modifies_links()
        .then(|| resolve_reference_links(doc, &markup));

    let output = if has_markup_to_modify(&markup, ops) {
        Output::Modified(modify(doc, &markup, reference_links.as_ref(), ops))
    } else {
        log::debug!("no requested modification has markup to modify");
        Output::Unchanged
    };

    Processed {
        markup,
        reference_links,
        output,
    }
}
