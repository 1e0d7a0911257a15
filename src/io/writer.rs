//! Output writing: parent directory creation, document serialization and
//! delivery of a finished file to the declared output path.

use lopdf::Document;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{PdfToolError, Result};

/// Create the output's parent directory if it is missing.
pub async fn ensure_parent_dir(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| PdfToolError::output_write(output, format!("cannot create directory: {err}")))?;
    }
    Ok(())
}

/// Serialize `doc` to `path` through a buffered writer.
///
/// Used by the engine for every intermediate and final file it produces.
pub fn save_document(operation: &'static str, doc: &mut Document, path: &Path) -> Result<()> {
    let file =
        std::fs::File::create(path).map_err(|err| PdfToolError::engine(operation, path, err))?;
    let mut writer = BufWriter::new(file);

    doc.save_to(&mut writer)
        .map_err(|err| PdfToolError::engine(operation, path, err))?;

    writer
        .flush()
        .map_err(|err| PdfToolError::engine(operation, path, err))?;

    Ok(())
}

/// Copy a finished file to the output path.
///
/// Copying a file onto itself is a no-op; `tokio::fs::copy` would truncate
/// it first.
///
/// # Returns
///
/// The number of bytes at the output path.
pub async fn deliver(source: &Path, output: &Path) -> Result<u64> {
    if is_same_file(source, output).await {
        let metadata = tokio::fs::metadata(output)
            .await
            .map_err(|err| PdfToolError::output_write(output, err))?;
        return Ok(metadata.len());
    }

    tokio::fs::copy(source, output)
        .await
        .map_err(|err| PdfToolError::output_write(output, err))
}

async fn is_same_file(a: &Path, b: &Path) -> bool {
    match (
        tokio::fs::canonicalize(a).await,
        tokio::fs::canonicalize(b).await,
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
