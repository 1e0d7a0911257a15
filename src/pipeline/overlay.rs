//! `pdf overlay`: combine two documents page by page.
//!
//! Page `i` of the second document is combined with page `i` of the first
//! for every page both share. The longer document's remaining pages are
//! appended unchanged.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::{build_overlay_sequence, read_page_count, split_into_pages};
use crate::config::{OverlayConfig, OverlayMode};
use crate::engine::PdfEngine;
use crate::error::{PdfToolError, Result};
use crate::io::{deliver, ensure_parent_dir, validate_input, validate_output};
use crate::output::{OutputFormatter, OverlaySummary, TailSource};
use crate::workspace::WorkingArea;

/// Which document supplies the unmatched pages, if any.
pub fn tail_source(file1_pages: usize, file2_pages: usize) -> Option<TailSource> {
    match file1_pages.cmp(&file2_pages) {
        std::cmp::Ordering::Greater => Some(TailSource::File1),
        std::cmp::Ordering::Less => Some(TailSource::File2),
        std::cmp::Ordering::Equal => None,
    }
}

/// Run the overlay pipeline.
///
/// # Errors
///
/// - Validation errors for empty or missing inputs, before any engine call
/// - Source-read errors when a document cannot be counted or split
/// - A page-combine error naming the first page that failed; nothing is
///   written to the output path in that case
/// - Output-write errors when the result cannot be delivered
#[instrument(skip_all, fields(file1 = %config.file1.display(), file2 = %config.file2.display()))]
pub async fn run(
    engine: &dyn PdfEngine,
    config: &OverlayConfig,
    temp_root: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<OverlaySummary> {
    validate_input("file1", &config.file1).await?;
    validate_input("file2", &config.file2).await?;
    validate_output("output", &config.output)?;
    ensure_parent_dir(&config.output).await?;

    formatter.info("Loading PDF files...");
    let file1_pages = read_page_count(engine, &config.file1)?;
    let file2_pages = read_page_count(engine, &config.file2)?;
    formatter.info(&format!(
        "File1: {file1_pages} pages, File2: {file2_pages} pages"
    ));

    if file1_pages == 0 && file2_pages == 0 {
        return Err(PdfToolError::source_read(
            &config.file1,
            "neither document has any pages",
        ));
    }

    let area = WorkingArea::create(temp_root, "pdf_overlay_")?;
    let pages1_dir = area.subdir("pages1").await?;
    let pages2_dir = area.subdir("pages2").await?;
    let overlaid_dir = area.subdir("overlaid").await?;

    let pages1 = split_into_pages(engine, &config.file1, &pages1_dir, file1_pages)?;
    let pages2 = split_into_pages(engine, &config.file2, &pages2_dir, file2_pages)?;

    let paired = file1_pages.min(file2_pages);
    let sequence = build_overlay_sequence(&pages1, &pages2, |index, base, top| {
        let page = index + 1;
        formatter.progress(page, paired, &format!("Processing page {page} (overlay)..."));
        combine_page(engine, config.mode, base, top, &overlaid_dir, page)
    })?;

    let tail = tail_source(file1_pages, file2_pages);
    match tail {
        Some(TailSource::File1) => formatter.info("Adding remaining pages from file1..."),
        Some(TailSource::File2) => formatter.info("Adding remaining pages from file2..."),
        None => {}
    }

    formatter.info("Merging pages into final PDF...");
    let result = area.file("overlaid.pdf");
    engine.merge(&sequence, &result)?;
    let pages_written = engine.page_count(&result)?;

    let bytes = deliver(&result, &config.output).await?;
    area.close();

    info!(pages = pages_written, bytes, "Overlay complete");
    Ok(OverlaySummary {
        output: config.output.clone(),
        mode: config.mode,
        file1_pages,
        file2_pages,
        combined_pages: paired,
        tail,
        pages_written,
    })
}

fn combine_page(
    engine: &dyn PdfEngine,
    mode: OverlayMode,
    base: &Path,
    top: &Path,
    out_dir: &Path,
    page: usize,
) -> Result<PathBuf> {
    let target = out_dir.join(format!("overlay_{page}.pdf"));
    debug!(page, mode = mode.as_str(), "Combining page");

    let combined = match mode {
        OverlayMode::Stamp => engine.overlay(base, top, &target),
        OverlayMode::Concat => engine.merge(&[base.to_path_buf(), top.to_path_buf()], &target),
    };

    combined
        .map(|()| target)
        .map_err(|err| PdfToolError::page_combine(page, err))
}
