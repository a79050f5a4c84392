pub mod analysis;
pub mod diagnostic;
pub mod document;
pub mod io;
pub mod modify;
pub mod operations;
pub mod pipeline;
pub mod resolve;


// Re-export key types for easier usage
pub use analysis::{DocumentMarkup, MarkupSummary, analyze};
pub use diagnostic::DiagnosticReport;
pub use document::SourceDocument;
pub use io::*;
pub use modify::modify;
pub use operations::*;
pub use pipeline::{Output, Processed, has_markup_to_modify, process};
pub use resolve::{ReferenceLinkKind, ReferenceLinkTable, ReferenceStyleLink, resolve_reference_links};
