use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::document::SourceDocument;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("File is empty: {0}")]
    EmptyFile(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a document from disk, rejecting files with no content
pub fn read_document(path: &Path) -> Result<SourceDocument, IoError> {
    if !path.is_file() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let doc = SourceDocument::new(fs::read_to_string(path)?);
    if doc.is_empty() {
        return Err(IoError::EmptyFile(path.to_path_buf()));
    }
    Ok(doc)
}

/// Replace the contents of `path` with `content`.
///
/// The new text goes to a temporary file in the same directory, which is then
/// renamed over the original, so a failure part way leaves the original file
/// intact.
pub fn write_document(path: &Path, content: &str) -> Result<(), IoError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut scratch = NamedTempFile::new_in(dir)?;
    scratch.write_all(content.as_bytes())?;
    scratch.flush()?;
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(scratch.path(), metadata.permissions())?;
    }
    scratch.persist(path).map_err(|e| IoError::Io(e.error))?;
    Ok(())
}
