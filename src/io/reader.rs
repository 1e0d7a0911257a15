//! Input validation and document loading.
//!
//! Every pipeline checks its inputs here before the engine is touched, so a
//! bad path never reaches `lopdf`.

use lopdf::Document;
use std::path::Path;

use crate::error::{PdfToolError, Result};

/// Validate a document reference given on the command line.
///
/// Checks, in order, that the argument is not empty, that the path exists,
/// that it is a regular file and that it holds at least one byte.
///
/// # Arguments
///
/// * `argument` - Flag name used in error messages (`file1`, `file`, ...)
/// * `path` - Path supplied for that flag
///
/// # Returns
///
/// The file size in bytes.
pub async fn validate_input(argument: &'static str, path: &Path) -> Result<u64> {
    if path.as_os_str().is_empty() {
        return Err(PdfToolError::empty_path(argument));
    }

    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(PdfToolError::file_not_found(path));
        }
        Err(err) => return Err(PdfToolError::Io { source: err }),
    };

    if !metadata.is_file() {
        return Err(PdfToolError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() == 0 {
        return Err(PdfToolError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    Ok(metadata.len())
}

/// Validate an output path argument.
pub fn validate_output(argument: &'static str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(PdfToolError::empty_path(argument));
    }

    if path.is_dir() {
        return Err(PdfToolError::output_write(path, "path is a directory"));
    }

    Ok(())
}

/// Load a PDF document, mapping failures to an engine error for `operation`.
pub fn load_document(operation: &'static str, path: &Path) -> Result<Document> {
    Document::load(path).map_err(|err| PdfToolError::engine(operation, path, err))
}
