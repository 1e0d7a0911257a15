//! `pdf reverse`: write a document with its pages in reverse order.

use std::path::Path;

use tracing::{info, instrument};

use super::{build_reverse_sequence, read_page_count, split_into_pages};
use crate::config::ReverseConfig;
use crate::engine::PdfEngine;
use crate::error::{PdfToolError, Result};
use crate::io::{deliver, ensure_parent_dir, validate_input, validate_output};
use crate::output::{OutputFormatter, ReverseSummary};
use crate::workspace::WorkingArea;

/// Run the reverse pipeline.
///
/// A document without pages is rejected as a source-read error.
#[instrument(skip_all, fields(file = %config.file.display()))]
pub async fn run(
    engine: &dyn PdfEngine,
    config: &ReverseConfig,
    temp_root: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<ReverseSummary> {
    validate_input("file", &config.file).await?;
    validate_output("output", &config.output)?;
    ensure_parent_dir(&config.output).await?;

    formatter.info("Loading PDF file...");
    let page_count = read_page_count(engine, &config.file)?;
    formatter.info(&format!("Input PDF has {page_count} pages"));

    if page_count == 0 {
        return Err(PdfToolError::source_read(&config.file, "document has no pages"));
    }

    let area = WorkingArea::create(temp_root, "pdf_reverse_")?;
    let pages_dir = area.subdir("pages").await?;

    formatter.info("Splitting PDF into pages...");
    let pages = split_into_pages(engine, &config.file, &pages_dir, page_count)?;

    formatter.info("Reversing page order...");
    let reversed = build_reverse_sequence(&pages);

    formatter.info("Merging pages into final PDF...");
    let result = area.file("reversed.pdf");
    engine.merge(&reversed, &result)?;

    let bytes = deliver(&result, &config.output).await?;
    area.close();

    info!(pages = page_count, bytes, "Reverse complete");
    Ok(ReverseSummary {
        output: config.output.clone(),
        pages: page_count,
    })
}
