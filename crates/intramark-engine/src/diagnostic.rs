use serde::Serialize;

use crate::analysis::DocumentMarkup;
use crate::resolve::ReferenceLinkTable;

/// A serialisable view of everything a run learned about a document.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport<'a> {
    pub markup: &'a DocumentMarkup,
    /// Only present when link resolution ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_links: Option<&'a ReferenceLinkTable>,
}

impl<'a> DiagnosticReport<'a> {
    pub fn new(markup: &'a DocumentMarkup, reference_links: Option<&'a ReferenceLinkTable>) -> Self {
        Self {
            markup,
            reference_links,
        }
    }

    /// Renders the report as indented JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
