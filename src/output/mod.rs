//! Output formatting and display for pdfutils.
//!
//! This module handles all user-facing output:
//! - Progress lines printed by the pipelines
//! - Final summaries for each operation
//! - The JSON run report
//!
//! # Examples
//!
//! ```no_run
//! use pdfutils::output::OutputFormatter;
//! use pdfutils::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Loading PDF file...");
//! # }
//! ```

pub mod formatter;
pub mod report;

pub use formatter::{MessageLevel, OutputFormatter};
pub use report::{
    AttemptOutcome, CompressionReport, OverlaySummary, Reduction, ReverseSummary, RunReport,
    StrategyAttempt, TailSource,
};

use crate::utils::format_file_size;

/// Display the final summary of a run.
///
/// # Arguments
///
/// * `formatter` - Output formatter to use
/// * `report` - Report returned by the pipeline
pub fn display_report(formatter: &OutputFormatter, report: &RunReport) {
    match report {
        RunReport::Overlay(summary) => {
            formatter.success(&format!(
                "Successfully created overlaid PDF with {} pages",
                summary.pages_written
            ));
            formatter.detail("Output", &summary.output.display().to_string());
            formatter.detail("Mode", summary.mode.as_str());
            formatter.detail("Combined pages", &summary.combined_pages.to_string());
        }
        RunReport::Reverse(summary) => {
            formatter.success(&format!(
                "Successfully created reversed PDF with {} pages",
                summary.pages
            ));
            formatter.detail("Output", &summary.output.display().to_string());
        }
        RunReport::Compress(report) => {
            match report.reduction {
                Reduction::Reduced { percent } => formatter.success(&format!(
                    "Compressed PDF: {} -> {} ({percent:.1}% reduction)",
                    format_file_size(report.original_size),
                    format_file_size(report.final_size),
                )),
                Reduction::NoReduction => formatter.info(&format!(
                    "No reduction achieved; original kept ({})",
                    format_file_size(report.original_size)
                )),
            }
            formatter.detail("Output", &report.output.display().to_string());
        }
    }
}
