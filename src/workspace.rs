//! Ephemeral working area for a single pipeline run.
//!
//! A [`WorkingArea`] owns a temporary directory that holds every split page,
//! combined page and compression candidate produced by one invocation. The
//! directory is removed when the value is dropped, whichever way the
//! pipeline exits.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::{PdfToolError, Result};

/// Scoped temporary directory owned by one pipeline invocation.
#[derive(Debug)]
pub struct WorkingArea {
    dir: TempDir,
}

impl WorkingArea {
    /// Create a new working area.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory to create the area in; the system temp dir if `None`
    /// * `prefix` - Name prefix, e.g. `pdf_overlay_`
    pub fn create(root: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);

        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|source| PdfToolError::WorkingArea { source })?;

        debug!(path = %dir.path().display(), "Created working area");
        Ok(Self { dir })
    }

    /// Root path of the working area.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file directly inside the working area.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Create (if needed) and return a subdirectory of the working area.
    pub async fn subdir(&self, name: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| PdfToolError::WorkingArea { source })?;
        Ok(path)
    }

    /// Remove the working area now.
    ///
    /// Dropping the value also removes it, but silently; closing reports a
    /// failed removal as a warning.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(err) = self.dir.close() {
            warn!(path = %path.display(), error = %err, "Failed to remove working area");
        }
    }
}
