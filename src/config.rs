//! Configuration module for pdfutils.
//!
//! CLI arguments are turned into an explicit [`Config`] that is passed down
//! to the pipelines. There is no global state: every invocation carries its
//! own settings, including the optional root for working areas.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PdfToolError, Result};

/// How a pair of pages is combined by the overlay pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayMode {
    /// Draw the second page on top of the first, producing one page.
    #[default]
    Stamp,
    /// Place the second page after the first, producing two pages.
    Concat,
}

impl OverlayMode {
    /// Name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stamp => "stamp",
            Self::Concat => "concat",
        }
    }
}

impl FromStr for OverlayMode {
    type Err = PdfToolError;

    /// Parse an overlay mode from `"stamp"` or `"concat"`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "stamp" => Ok(Self::Stamp),
            "concat" => Ok(Self::Concat),
            _ => Err(PdfToolError::invalid_config(format!(
                "Invalid overlay mode: {s}. Must be one of: stamp, concat"
            ))),
        }
    }
}

/// Settings for `pdf overlay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    /// Base document; its pages form the tail when it is longer.
    pub file1: PathBuf,
    /// Document drawn on top of `file1`.
    pub file2: PathBuf,
    /// Output path.
    pub output: PathBuf,
    /// Page combination mode.
    pub mode: OverlayMode,
}

/// Settings for `pdf reverse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseConfig {
    /// Input document.
    pub file: PathBuf,
    /// Output path.
    pub output: PathBuf,
}

/// Settings for `pdf compress`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressConfig {
    /// Input document.
    pub file: PathBuf,
    /// Output path.
    pub output: PathBuf,
}

/// The operation a run performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Overlay two documents page by page.
    Overlay(OverlayConfig),
    /// Reverse the page order of a document.
    Reverse(ReverseConfig),
    /// Compress a document.
    Compress(CompressConfig),
}

impl Task {
    /// Short name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Overlay(_) => "overlay",
            Self::Reverse(_) => "reverse",
            Self::Compress(_) => "compress",
        }
    }

    /// Output path of the operation.
    pub fn output(&self) -> &Path {
        match self {
            Self::Overlay(config) => &config.output,
            Self::Reverse(config) => &config.output,
            Self::Compress(config) => &config.output,
        }
    }
}

/// Validated configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Operation to run.
    pub task: Task,

    /// Directory to create working areas in (system temp dir if `None`).
    pub temp_root: Option<PathBuf>,

    /// Quiet mode - suppress progress output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Print a JSON run report instead of progress lines.
    pub json: bool,
}

impl Config {
    /// Create a configuration with default output settings.
    pub fn new(task: Task) -> Self {
        Self {
            task,
            temp_root: None,
            quiet: false,
            verbose: false,
            json: false,
        }
    }

    /// Root for working areas, if one was configured.
    pub fn temp_root(&self) -> Option<&Path> {
        self.temp_root.as_deref()
    }

    /// Validate the configuration.
    ///
    /// File existence of inputs is checked later by the pipelines, so that
    /// the error category reflects the failing argument.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The temp root is set but is not an existing directory
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(PdfToolError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if let Some(root) = &self.temp_root
            && !root.is_dir()
        {
            return Err(PdfToolError::invalid_config(format!(
                "Temp directory does not exist or is not a directory: {}",
                root.display()
            )));
        }

        Ok(())
    }
}
