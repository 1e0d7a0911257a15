//! PDF engine adapter.
//!
//! Pipelines never touch PDF structure directly. They hand file paths to a
//! [`PdfEngine`], which reads, splits, merges, optimizes and stamps pages.
//! [`LopdfEngine`] is the production implementation; tests substitute fakes
//! that record calls or produce files of chosen sizes.

#[cfg(test)]
pub(crate) mod fake;
mod lopdf_engine;

pub use lopdf_engine::LopdfEngine;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Operations the pipelines need from a PDF library.
pub trait PdfEngine {
    /// Number of pages in the document at `path`.
    fn page_count(&self, path: &Path) -> Result<usize>;

    /// Write one single-page PDF per page of `path` into `out_dir`.
    ///
    /// File names are chosen by the engine; callers discover them by listing
    /// the directory.
    fn split(&self, path: &Path, out_dir: &Path) -> Result<()>;

    /// Concatenate `inputs`, in order, into a new document at `output`.
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()>;

    /// Write a size-optimized copy of `input` to `output`.
    fn optimize(&self, input: &Path, output: &Path) -> Result<()>;

    /// Draw the first page of `top` over the first page of `base`.
    ///
    /// Engines without compositing support fall back to merging the two
    /// pages one after the other.
    fn overlay(&self, base: &Path, top: &Path, output: &Path) -> Result<()> {
        self.merge(&[base.to_path_buf(), top.to_path_buf()], output)
    }
}
