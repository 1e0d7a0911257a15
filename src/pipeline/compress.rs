//! `pdf compress`: best-of-N size reduction.
//!
//! A fixed, ordered list of [`CompressionStrategy`] values is folded over a
//! running best [`Candidate`] that starts as the input file. A strategy's
//! result replaces the best only when it is strictly smaller, and feeds the
//! strategies after it. Failed strategies are logged and skipped.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use tracing::{debug, info, instrument, warn};

use super::read_page_count;
use crate::config::CompressConfig;
use crate::engine::PdfEngine;
use crate::error::{PdfToolError, Result};
use crate::io::{deliver, ensure_parent_dir, validate_input, validate_output};
use crate::output::report::compression_ratio;
use crate::output::{AttemptOutcome, CompressionReport, OutputFormatter, StrategyAttempt};
use crate::utils::{collect_page_files, format_megabytes};
use crate::workspace::WorkingArea;

/// A file produced by a strategy, with its size in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Location of the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
}

impl Candidate {
    /// Stat `path` and wrap it as a candidate.
    pub fn from_file(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)
            .with_context(|| format!("cannot stat {}", path.display()))?
            .len();
        Ok(Self { path, size })
    }
}

/// What a strategy gets to work with.
pub struct StrategyContext<'a> {
    /// Engine to run operations with.
    pub engine: &'a dyn PdfEngine,
    /// Working area directory; strategies write their files here.
    pub work_dir: &'a Path,
    /// Progress output.
    pub formatter: &'a OutputFormatter,
    /// Size of the input document, for progress percentages.
    pub original_size: u64,
}

impl StrategyContext<'_> {
    /// Print the progress line for a kept result and return it.
    fn report_size(&self, label: &str, size: u64) -> String {
        let line = size_line(label, self.original_size, size);
        self.formatter.info(&line);
        line
    }
}

/// `"{label}: X MB (Y% reduction)"`, or "no reduction achieved" when `size`
/// is not below `original_size`.
fn size_line(label: &str, original_size: u64, size: u64) -> String {
    let ratio = compression_ratio(original_size, size);
    if ratio > 0.0 {
        format!(
            "{label}: {} ({:.1}% reduction)",
            format_megabytes(size),
            ratio * 100.0
        )
    } else {
        format!("{label}: {} (no reduction achieved)", format_megabytes(size))
    }
}

/// One way of producing a smaller document.
pub trait CompressionStrategy {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Progress line printed before the attempt.
    fn announcement(&self) -> &'static str;

    /// Label of the size line printed when the result is kept.
    fn label(&self) -> &'static str {
        self.name()
    }

    /// Produce a candidate from the current best.
    ///
    /// The returned candidate may be larger than `best`; the caller decides
    /// whether to adopt it.
    fn attempt(&self, ctx: &StrategyContext<'_>, best: &Candidate) -> anyhow::Result<Candidate>;
}

/// A single optimize pass over the current best.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectOptimize;

impl CompressionStrategy for DirectOptimize {
    fn name(&self) -> &'static str {
        "direct-optimize"
    }

    fn announcement(&self) -> &'static str {
        "Trying basic optimization..."
    }

    fn label(&self) -> &'static str {
        "Basic optimization"
    }

    fn attempt(&self, ctx: &StrategyContext<'_>, best: &Candidate) -> anyhow::Result<Candidate> {
        let output = ctx.work_dir.join("optimized.pdf");
        ctx.engine.optimize(&best.path, &output)?;
        Candidate::from_file(output)
    }
}

/// Split the current best into pages and merge them back.
///
/// Rebuilding the page tree from single-page documents drops objects the
/// pages no longer reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitRemerge;

impl CompressionStrategy for SplitRemerge {
    fn name(&self) -> &'static str {
        "split-remerge"
    }

    fn announcement(&self) -> &'static str {
        "Trying split-merge compression..."
    }

    fn label(&self) -> &'static str {
        "Split-merge compression"
    }

    fn attempt(&self, ctx: &StrategyContext<'_>, best: &Candidate) -> anyhow::Result<Candidate> {
        let pages_dir = ctx.work_dir.join("pages");
        std::fs::create_dir_all(&pages_dir)
            .with_context(|| format!("cannot create {}", pages_dir.display()))?;

        ctx.engine.split(&best.path, &pages_dir)?;
        let pages = collect_page_files(&pages_dir)?;
        if pages.is_empty() {
            bail!("split produced no pages");
        }

        let output = ctx.work_dir.join("merged.pdf");
        ctx.engine.merge(&pages, &output)?;
        Candidate::from_file(output)
    }
}

/// Repeated optimize passes, each fed the previous pass's output.
///
/// The loop stops at the first pass that is not strictly smaller than the
/// best so far, or that fails. A failure of the first pass is the
/// strategy's failure; later failures keep what was reached.
#[derive(Debug, Clone, Copy)]
pub struct IterativeOptimize {
    /// Upper bound on the number of passes.
    pub max_passes: usize,
}

impl Default for IterativeOptimize {
    fn default() -> Self {
        Self { max_passes: 3 }
    }
}

impl CompressionStrategy for IterativeOptimize {
    fn name(&self) -> &'static str {
        "iterative-optimize"
    }

    fn announcement(&self) -> &'static str {
        "Trying multiple optimization passes..."
    }

    fn label(&self) -> &'static str {
        "Multiple passes"
    }

    fn attempt(&self, ctx: &StrategyContext<'_>, best: &Candidate) -> anyhow::Result<Candidate> {
        let mut current = best.clone();
        let mut improved = false;

        for pass in 1..=self.max_passes {
            let output = ctx.work_dir.join(format!("pass{pass}.pdf"));
            let result = ctx
                .engine
                .optimize(&current.path, &output)
                .map_err(anyhow::Error::from)
                .and_then(|()| Candidate::from_file(output));

            let candidate = match result {
                Ok(candidate) => candidate,
                Err(err) if !improved => return Err(err.context(format!("pass {pass} failed"))),
                Err(err) => {
                    warn!(pass, error = %err, "Optimization pass failed, keeping earlier pass");
                    break;
                }
            };

            if candidate.size >= current.size {
                debug!(pass, size = candidate.size, "Pass not smaller, stopping");
                if !improved {
                    return Ok(candidate);
                }
                break;
            }

            ctx.report_size(&format!("Pass {pass}"), candidate.size);
            current = candidate;
            improved = true;
        }

        Ok(current)
    }
}

/// The strategies `pdf compress` runs, in order.
pub fn default_strategies() -> Vec<Box<dyn CompressionStrategy>> {
    vec![
        Box::new(DirectOptimize),
        Box::new(SplitRemerge),
        Box::new(IterativeOptimize::default()),
    ]
}

/// Fold `strategies` over `original`, keeping the smallest candidate.
///
/// Never fails: a failing strategy is recorded and the fold moves on with
/// the best so far.
pub fn select_best(
    strategies: &[Box<dyn CompressionStrategy>],
    ctx: &StrategyContext<'_>,
    original: Candidate,
) -> (Candidate, Vec<StrategyAttempt>) {
    let mut best = original;
    let mut attempts = Vec::with_capacity(strategies.len());

    for strategy in strategies {
        ctx.formatter.info(strategy.announcement());

        let outcome = match strategy.attempt(ctx, &best) {
            Ok(candidate) if candidate.size < best.size => {
                let size = candidate.size;
                ctx.report_size(strategy.label(), size);
                best = candidate;
                AttemptOutcome::Adopted { size }
            }
            Ok(candidate) => {
                ctx.formatter.debug(&format!(
                    "{}: {} is not smaller than the current best, discarded",
                    strategy.label(),
                    format_megabytes(candidate.size)
                ));
                AttemptOutcome::NotSmaller {
                    size: candidate.size,
                }
            }
            Err(err) => {
                let error = PdfToolError::strategy_failed(strategy.name(), format!("{err:#}"));
                warn!(strategy = strategy.name(), error = %error, "Compression strategy failed");
                if error.is_recoverable() {
                    ctx.formatter
                        .warning(&format!("{error}; continuing with the best result so far"));
                }
                AttemptOutcome::Failed {
                    reason: format!("{err:#}"),
                }
            }
        };

        attempts.push(StrategyAttempt {
            strategy: strategy.name(),
            outcome,
        });
    }

    (best, attempts)
}

/// Run the compression pipeline with the default strategies.
#[instrument(skip_all, fields(file = %config.file.display()))]
pub async fn run(
    engine: &dyn PdfEngine,
    config: &CompressConfig,
    temp_root: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<CompressionReport> {
    run_with_strategies(engine, config, temp_root, formatter, &default_strategies()).await
}

/// Run the compression pipeline with an explicit strategy list.
///
/// # Errors
///
/// - Validation errors for the input and output arguments
/// - A source-read error when the input's page count cannot be read
/// - Output-write errors when the best candidate cannot be delivered
///
/// Strategy failures are never returned.
pub async fn run_with_strategies(
    engine: &dyn PdfEngine,
    config: &CompressConfig,
    temp_root: Option<&Path>,
    formatter: &OutputFormatter,
    strategies: &[Box<dyn CompressionStrategy>],
) -> Result<CompressionReport> {
    let original_size = validate_input("file", &config.file).await?;
    validate_output("output", &config.output)?;
    ensure_parent_dir(&config.output).await?;

    formatter.info(&format!("Loading PDF file: {}", config.file.display()));
    let pages = read_page_count(engine, &config.file)?;
    formatter.info(&format!(
        "Original PDF: {pages} pages, {}",
        format_megabytes(original_size)
    ));

    let area = WorkingArea::create(temp_root, "pdf_compress_")?;
    let ctx = StrategyContext {
        engine,
        work_dir: area.path(),
        formatter,
        original_size,
    };

    let original = Candidate {
        path: config.file.clone(),
        size: original_size,
    };
    formatter.section("Compression strategies");
    let (best, attempts) = select_best(strategies, &ctx, original);

    formatter.info("Finalizing compression...");
    let final_size = deliver(&best.path, &config.output).await?;
    area.close();

    info!(original_size, final_size, "Compression complete");
    Ok(CompressionReport::new(
        config.output.clone(),
        pages,
        original_size,
        final_size,
        attempts,
    ))
}
