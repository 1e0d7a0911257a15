//! Run reports.
//!
//! Each pipeline returns a summary of what it did. The summaries are shown
//! as human-readable lines by [`display_report`](super::display_report) or
//! serialized as JSON with `--json`.

use serde::Serialize;
use std::path::PathBuf;

use crate::config::OverlayMode;
use crate::error::Result;

/// Which document supplied the trailing pages of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TailSource {
    /// The first document was longer.
    File1,
    /// The second document was longer.
    File2,
}

/// Outcome of `pdf overlay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlaySummary {
    /// Output path.
    pub output: PathBuf,
    /// Page combination mode.
    pub mode: OverlayMode,
    /// Pages in the first document.
    pub file1_pages: usize,
    /// Pages in the second document.
    pub file2_pages: usize,
    /// Number of page pairs that were combined.
    pub combined_pages: usize,
    /// Document the remaining pages came from, if lengths differed.
    pub tail: Option<TailSource>,
    /// Pages in the written document.
    pub pages_written: usize,
}

/// Outcome of `pdf reverse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReverseSummary {
    /// Output path.
    pub output: PathBuf,
    /// Pages in the written document.
    pub pages: usize,
}

/// What happened to one compression strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The candidate was strictly smaller and became the new best.
    Adopted {
        /// Candidate size in bytes.
        size: u64,
    },
    /// The candidate was not smaller than the best so far.
    NotSmaller {
        /// Candidate size in bytes.
        size: u64,
    },
    /// The strategy failed; the best so far was kept.
    Failed {
        /// Failure description.
        reason: String,
    },
}

/// One entry of the compression log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyAttempt {
    /// Strategy name.
    pub strategy: &'static str,
    /// What happened.
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// Size reduction achieved by compression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reduction {
    /// The output is smaller than the input.
    Reduced {
        /// Reduction in percent of the original size.
        percent: f64,
    },
    /// No strategy produced a smaller file.
    NoReduction,
}

/// Outcome of `pdf compress`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionReport {
    /// Output path.
    pub output: PathBuf,
    /// Pages in the input document.
    pub pages: usize,
    /// Input size in bytes.
    pub original_size: u64,
    /// Output size in bytes.
    pub final_size: u64,
    /// Achieved reduction.
    pub reduction: Reduction,
    /// Per-strategy log, in execution order.
    pub attempts: Vec<StrategyAttempt>,
}

impl CompressionReport {
    /// Build a report, deriving the reduction from the two sizes.
    pub fn new(
        output: PathBuf,
        pages: usize,
        original_size: u64,
        final_size: u64,
        attempts: Vec<StrategyAttempt>,
    ) -> Self {
        let ratio = compression_ratio(original_size, final_size);
        let reduction = if ratio > 0.0 {
            Reduction::Reduced {
                percent: ratio * 100.0,
            }
        } else {
            Reduction::NoReduction
        };

        Self {
            output,
            pages,
            original_size,
            final_size,
            reduction,
            attempts,
        }
    }
}

/// `(original - best) / original`; zero for an empty original.
pub fn compression_ratio(original: u64, best: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - best as f64) / original as f64
}

/// Report of one run, tagged by operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum RunReport {
    /// `pdf overlay`.
    Overlay(OverlaySummary),
    /// `pdf reverse`.
    Reverse(ReverseSummary),
    /// `pdf compress`.
    Compress(CompressionReport),
}

impl RunReport {
    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
