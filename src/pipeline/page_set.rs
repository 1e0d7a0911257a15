//! Page-source sequence construction.
//!
//! The sequence builders are pure and generic over the page-source type, so
//! the ordering rules can be tested without touching the filesystem.

use std::path::{Path, PathBuf};

use crate::engine::PdfEngine;
use crate::error::{PdfToolError, Result};
use crate::utils::collect_page_files;

/// Pair up two page sequences and append the unmatched tail.
///
/// `combine` is called with the 0-based index and the pages at that index
/// in both inputs, for every index both inputs share. Pages past the end of
/// the shorter input are appended unchanged, so the result always has
/// `max(pages_a.len(), pages_b.len())` entries.
///
/// The first error returned by `combine` aborts the build.
pub fn build_overlay_sequence<T, E, F>(
    pages_a: &[T],
    pages_b: &[T],
    mut combine: F,
) -> std::result::Result<Vec<T>, E>
where
    T: Clone,
    F: FnMut(usize, &T, &T) -> std::result::Result<T, E>,
{
    let paired = pages_a.len().min(pages_b.len());
    let mut sequence = Vec::with_capacity(pages_a.len().max(pages_b.len()));

    for (index, (a, b)) in pages_a.iter().zip(pages_b).enumerate() {
        sequence.push(combine(index, a, b)?);
    }

    let tail = if pages_a.len() > paired {
        &pages_a[paired..]
    } else {
        &pages_b[paired..]
    };
    sequence.extend_from_slice(tail);

    Ok(sequence)
}

/// The pages in reverse order.
pub fn build_reverse_sequence<T: Clone>(pages: &[T]) -> Vec<T> {
    pages.iter().rev().cloned().collect()
}

/// Split `path` into `out_dir` and return the produced page files in page
/// order.
///
/// Fails with a source-read error when the engine cannot split the document
/// or the number of discovered files differs from `expected`.
pub fn split_into_pages(
    engine: &dyn PdfEngine,
    path: &Path,
    out_dir: &Path,
    expected: usize,
) -> Result<Vec<PathBuf>> {
    engine
        .split(path, out_dir)
        .map_err(|err| PdfToolError::source_read(path, err))?;

    let pages = collect_page_files(out_dir)?;
    if pages.len() != expected {
        return Err(PdfToolError::source_read(
            path,
            format!("split produced {} pages, expected {expected}", pages.len()),
        ));
    }

    Ok(pages)
}
