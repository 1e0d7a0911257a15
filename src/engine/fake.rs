//! Text-file engine for pipeline tests.
//!
//! A "document" is a text file with one page label per line. Splitting
//! writes one file per line, merging concatenates lines, and overlaying
//! joins the two first lines with `+`. Optimizing writes a file of the next
//! queued size.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use super::PdfEngine;
use crate::error::{PdfToolError, Result};

#[derive(Debug, Default)]
pub(crate) struct FakeEngine {
    /// Sizes produced by successive `optimize` calls; `None` fails the call.
    optimize_sizes: RefCell<VecDeque<Option<u64>>>,
    failing: Vec<&'static str>,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_optimize_sizes(sizes: &[Option<u64>]) -> Self {
        Self {
            optimize_sizes: RefCell::new(sizes.iter().copied().collect()),
            ..Self::default()
        }
    }

    /// Make every call to `operation` fail.
    pub(crate) fn failing(mut self, operation: &'static str) -> Self {
        self.failing.push(operation);
        self
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn enter(&self, operation: &'static str, path: &Path) -> Result<()> {
        self.calls.borrow_mut().push(operation);
        if self.failing.contains(&operation) {
            return Err(PdfToolError::engine(operation, path, "injected failure"));
        }
        Ok(())
    }
}

pub(crate) fn write_pages(path: &Path, pages: &[&str]) {
    let body: String = pages.iter().map(|page| format!("{page}\n")).collect();
    std::fs::write(path, body).unwrap();
}

pub(crate) fn read_pages(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn lines(operation: &'static str, path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| PdfToolError::engine(operation, path, err))?;
    Ok(text
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

impl PdfEngine for FakeEngine {
    fn page_count(&self, path: &Path) -> Result<usize> {
        self.enter("page_count", path)?;
        Ok(lines("page_count", path)?.len())
    }

    fn split(&self, path: &Path, out_dir: &Path) -> Result<()> {
        self.enter("split", path)?;
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("page");
        for (index, page) in lines("split", path)?.iter().enumerate() {
            let target = out_dir.join(format!("{stem}_{}.pdf", index + 1));
            std::fs::write(&target, format!("{page}\n"))
                .map_err(|err| PdfToolError::engine("split", &target, err))?;
        }
        Ok(())
    }

    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        self.enter("merge", output)?;
        let mut body = String::new();
        for input in inputs {
            for page in lines("merge", input)? {
                body.push_str(&page);
                body.push('\n');
            }
        }
        std::fs::write(output, body).map_err(|err| PdfToolError::engine("merge", output, err))
    }

    fn optimize(&self, input: &Path, output: &Path) -> Result<()> {
        self.enter("optimize", input)?;
        match self.optimize_sizes.borrow_mut().pop_front().flatten() {
            Some(size) => std::fs::write(output, vec![b'x'; size as usize])
                .map_err(|err| PdfToolError::engine("optimize", output, err)),
            None => Err(PdfToolError::engine("optimize", input, "no size queued")),
        }
    }

    fn overlay(&self, base: &Path, top: &Path, output: &Path) -> Result<()> {
        self.enter("overlay", base)?;
        let base_page = lines("overlay", base)?.join("");
        if base_page.contains("bad") {
            return Err(PdfToolError::engine("overlay", base, "unreadable content stream"));
        }
        let top_page = lines("overlay", top)?.join("");
        std::fs::write(output, format!("{base_page}+{top_page}\n"))
            .map_err(|err| PdfToolError::engine("overlay", output, err))
    }
}
