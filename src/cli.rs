//! CLI argument parsing for pdfutils.
//!
//! This module defines the command-line interface using `clap`. Commands
//! live under the `pdf` group:
//!
//! ```text
//! pdfutils pdf overlay  --file1 a.pdf --file2 b.pdf --output out.pdf
//! pdfutils pdf reverse  --file in.pdf --output out.pdf
//! pdfutils pdf compress --file in.pdf --output out.pdf
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{CompressConfig, Config, OverlayConfig, OverlayMode, ReverseConfig, Task};
use crate::error::Result;

/// Overlay, reverse and compress PDF documents.
#[derive(Parser, Debug)]
#[command(name = "pdfutils")]
#[command(version)]
#[command(about = "Overlay, reverse, and compress PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Suppress progress output
    ///
    /// Only warnings and errors will be printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show detail lines and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print a JSON report of the run to stdout
    ///
    /// Progress lines are suppressed so stdout holds only the report.
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory to create temporary working areas in
    ///
    /// Defaults to the system temporary directory.
    #[arg(long, global = true, value_name = "DIR", env = "PDFUTILS_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// PDF document operations
    Pdf(PdfArgs),
}

/// Arguments of the `pdf` group.
#[derive(Args, Debug)]
pub struct PdfArgs {
    #[command(subcommand)]
    pub command: PdfCommand,
}

/// Operations of the `pdf` group.
#[derive(Subcommand, Debug)]
pub enum PdfCommand {
    /// Overlay two PDFs page by page
    ///
    /// Page N of --file2 is combined with page N of --file1. When one
    /// document is longer, its remaining pages are appended unchanged.
    Overlay {
        /// Base PDF
        #[arg(long, value_name = "FILE")]
        file1: PathBuf,

        /// PDF drawn on top of the base
        #[arg(long, value_name = "FILE")]
        file2: PathBuf,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// How page pairs are combined
        ///
        /// - stamp: draw the file2 page over the file1 page (default)
        /// - concat: place the file2 page after the file1 page
        #[arg(long, value_name = "MODE", default_value = "stamp")]
        #[arg(value_parser = ["stamp", "concat"])]
        mode: String,
    },

    /// Reverse the page order of a PDF
    Reverse {
        /// Input PDF
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Compress a PDF by trying several strategies and keeping the smallest
    Compress {
        /// Input PDF
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Output PDF file path
        ///
        /// May be the same as the input file.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if the overlay mode is invalid or the configuration
    /// fails validation (e.g. the temp directory does not exist).
    pub fn to_config(&self) -> Result<Config> {
        let Commands::Pdf(pdf) = &self.command;

        let task = match &pdf.command {
            PdfCommand::Overlay {
                file1,
                file2,
                output,
                mode,
            } => Task::Overlay(OverlayConfig {
                file1: file1.clone(),
                file2: file2.clone(),
                output: output.clone(),
                mode: OverlayMode::from_str(mode)?,
            }),
            PdfCommand::Reverse { file, output } => Task::Reverse(ReverseConfig {
                file: file.clone(),
                output: output.clone(),
            }),
            PdfCommand::Compress { file, output } => Task::Compress(CompressConfig {
                file: file.clone(),
                output: output.clone(),
            }),
        };

        let config = Config {
            task,
            temp_root: self.temp_dir.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
            json: self.json,
        };

        config.validate()?;
        Ok(config)
    }
}
