//! Error types for pdfutils.
//!
//! Every failure a run can hit is a [`PdfToolError`]. Variants are grouped
//! into an [`ErrorCategory`] that decides whether the run stops and which
//! exit status the process reports.
//!
//! # Error Categories
//!
//! - **Validation**: empty path arguments, missing or empty input files
//! - **Source read**: the engine cannot parse or split an input document
//! - **Page combine**: a single page-level overlay step failed
//! - **Strategy failure**: one compression strategy failed (recoverable)
//! - **Output write**: the result cannot be delivered to the output path

use std::io;
use std::path::{Path, PathBuf};

/// Result type alias for pdfutils operations.
pub type Result<T> = std::result::Result<T, PdfToolError>;

/// Coarse classification of a [`PdfToolError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, detected before any engine call.
    Validation,
    /// An input document could not be parsed or split.
    SourceRead,
    /// A per-page overlay step failed.
    PageCombine,
    /// A single compression strategy failed.
    StrategyFailure,
    /// The final result could not be written.
    OutputWrite,
    /// Invalid configuration.
    Config,
    /// Engine, filesystem or reporting failures outside a pipeline stage.
    Internal,
}

/// Main error type for pdfutils operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfToolError {
    /// A required path argument was empty.
    #[error("Path for --{argument} cannot be empty")]
    EmptyPath {
        /// Name of the offending argument.
        argument: &'static str,
    },

    /// Input file was not found.
    #[error("File does not exist: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file has zero bytes.
    #[error("File is empty: {}", .path.display())]
    EmptyFile {
        /// Path to the empty file.
        path: PathBuf,
    },

    /// The engine could not read or split an input document.
    #[error("Failed to read PDF: {}\n  Reason: {reason}", .path.display())]
    SourceRead {
        /// Path to the input document.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Combining a pair of pages failed.
    #[error("Failed to overlay page {page}\n  Reason: {reason}")]
    PageCombine {
        /// 1-based page number.
        page: usize,
        /// Reason for the failure.
        reason: String,
    },

    /// A compression strategy failed; the pipeline moves on.
    #[error("Compression strategy '{strategy}' failed: {reason}")]
    StrategyFailed {
        /// Name of the strategy.
        strategy: &'static str,
        /// Reason for the failure.
        reason: String,
    },

    /// The result could not be written to the output path.
    #[error("Failed to write output file: {}\n  Reason: {reason}", .path.display())]
    OutputWrite {
        /// Output path.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// A single engine operation failed.
    #[error("PDF engine {operation} failed for {}: {reason}", .path.display())]
    Engine {
        /// Engine operation name (`split`, `merge`, ...).
        operation: &'static str,
        /// File the operation was working on.
        path: PathBuf,
        /// Reason reported by the engine.
        reason: String,
    },

    /// The temporary working area could not be prepared.
    #[error("Failed to prepare working directory: {source}")]
    WorkingArea {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// The JSON run report could not be produced.
    #[error("Failed to render report: {source}")]
    Report {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl PdfToolError {
    /// Create an EmptyPath error.
    pub fn empty_path(argument: &'static str) -> Self {
        Self::EmptyPath { argument }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a SourceRead error for `path`.
    pub fn source_read(path: &Path, reason: impl ToString) -> Self {
        Self::SourceRead {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create a PageCombine error for a 1-based page number.
    pub fn page_combine(page: usize, reason: impl ToString) -> Self {
        Self::PageCombine {
            page,
            reason: reason.to_string(),
        }
    }

    /// Create a StrategyFailed error.
    pub fn strategy_failed(strategy: &'static str, reason: impl ToString) -> Self {
        Self::StrategyFailed {
            strategy,
            reason: reason.to_string(),
        }
    }

    /// Create an OutputWrite error for `path`.
    pub fn output_write(path: &Path, reason: impl ToString) -> Self {
        Self::OutputWrite {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create an Engine error.
    pub fn engine(operation: &'static str, path: &Path, reason: impl ToString) -> Self {
        Self::Engine {
            operation,
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyPath { .. }
            | Self::FileNotFound { .. }
            | Self::NotAFile { .. }
            | Self::EmptyFile { .. } => ErrorCategory::Validation,
            Self::SourceRead { .. } => ErrorCategory::SourceRead,
            Self::PageCombine { .. } => ErrorCategory::PageCombine,
            Self::StrategyFailed { .. } => ErrorCategory::StrategyFailure,
            Self::OutputWrite { .. } => ErrorCategory::OutputWrite,
            Self::InvalidConfig { .. } => ErrorCategory::Config,
            Self::Engine { .. } | Self::WorkingArea { .. } | Self::Report { .. } | Self::Io { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    /// Check if the run can continue after this error.
    ///
    /// Only a failed compression strategy is recoverable; everything else
    /// terminates the run.
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::StrategyFailure
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyPath { .. }
            | Self::FileNotFound { .. }
            | Self::NotAFile { .. }
            | Self::EmptyFile { .. } => 2,
            Self::SourceRead { .. } => 3,
            Self::Engine { .. } => 4,
            Self::OutputWrite { .. } | Self::WorkingArea { .. } | Self::Io { .. } => 5,
            Self::PageCombine { .. } => 6,
            Self::StrategyFailed { .. } => 7,
            Self::InvalidConfig { .. } | Self::Report { .. } => 1,
        }
    }
}
