//! Operation pipelines.
//!
//! Each pipeline validates its arguments, works inside its own
//! [`WorkingArea`](crate::workspace::WorkingArea), drives the engine one
//! call at a time and delivers the finished file to the output path. The
//! engine is synchronous; pipelines await only filesystem operations.

pub mod compress;
pub mod overlay;
pub mod page_set;
pub mod reverse;

pub use page_set::{build_overlay_sequence, build_reverse_sequence, split_into_pages};

use std::path::Path;

use crate::engine::PdfEngine;
use crate::error::{PdfToolError, Result};

/// Page count of an input document, as a source-read failure if unreadable.
pub(crate) fn read_page_count(engine: &dyn PdfEngine, path: &Path) -> Result<usize> {
    engine
        .page_count(path)
        .map_err(|err| PdfToolError::source_read(path, err))
}
