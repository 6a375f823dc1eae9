//! Schema loading from files and strings.

use std::path::Path;

use crate::ast::Document;
use crate::error::TransformError;
use crate::parser::parse_document;

/// Load and parse a schema file.
///
/// # Errors
///
/// Returns `TransformError::FileNotFound` if the file doesn't exist,
/// or `TransformError::Parse` if the file isn't valid schema text.
pub fn load_document(path: &Path) -> Result<Document, TransformError> {
    if !path.exists() {
        return Err(TransformError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| TransformError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("loaded {} ({} bytes)", path.display(), content.len());
    load_document_str(&content)
}

/// Parse a schema from a string.
pub fn load_document_str(content: &str) -> Result<Document, TransformError> {
    parse_document(content)
}

/// Write generated output to `path`.
pub fn write_output(path: &Path, content: &str) -> Result<(), TransformError> {
    std::fs::write(path, content).map_err(|source| TransformError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}
