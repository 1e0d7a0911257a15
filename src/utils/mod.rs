//! Utilities for page file discovery and size formatting.

use crate::{PdfToolError, Result};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// List the per-page PDF files an engine wrote into `dir`.
///
/// The engine picks its own file names, so the directory is globbed for
/// `*.pdf` and the matches are ordered by the trailing page number in each
/// file stem (`doc_2.pdf` sorts before `doc_10.pdf`). Files without a
/// trailing number sort after numbered ones, by name.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from the glob iterator.
pub fn collect_page_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.pdf",
        glob::Pattern::escape(&dir.to_string_lossy())
    );

    let entries = glob::glob(&pattern).map_err(|err| PdfToolError::WorkingArea {
        source: std::io::Error::other(err),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| PdfToolError::WorkingArea {
            source: err.into(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| compare_page_files(a, b));
    Ok(files)
}

/// Trailing decimal number of a file stem, e.g. `7` for `report_7.pdf`.
fn trailing_number(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let digits_start = stem
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |idx| idx + 1);
    stem[digits_start..].parse().ok()
}

fn compare_page_files(a: &Path, b: &Path) -> Ordering {
    match (trailing_number(a), trailing_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}

/// Format a byte count in megabytes with two decimals.
pub fn format_megabytes(size: u64) -> String {
    format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
}
