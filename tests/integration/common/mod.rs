//! Shared helpers for the integration tests.
//!
//! Fixtures are generated with `lopdf` instead of being checked in: each
//! page draws the text `"{label} {n}"`, so page order can be verified from
//! the content streams.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use pdfutils::{LopdfEngine, PdfEngine, Result};

/// Write a PDF with `pages` pages labelled `"{label} 1"` to `"{label} n"`.
pub fn write_sample_pdf(path: &Path, pages: usize, label: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for n in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 36.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("{label} {n}"))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    doc.save(path).unwrap();
}

/// Number of pages in the PDF at `path`.
pub fn page_count(path: &Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}

/// Decoded content of page `number` (1-based).
pub fn page_text(path: &Path, number: u32) -> String {
    let doc = Document::load(path).unwrap();
    let page_id = doc.get_pages()[&number];
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}

/// Whether page `number` draws the string literal `text`.
pub fn page_shows(path: &Path, number: u32, text: &str) -> bool {
    page_text(path, number).contains(&format!("({text})"))
}

/// Paths inside `dir`, for checking that working areas were removed.
pub fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}

/// [`LopdfEngine`] wrapper that counts calls.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    inner: LopdfEngine,
    calls: Cell<usize>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn record(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl PdfEngine for RecordingEngine {
    fn page_count(&self, path: &Path) -> Result<usize> {
        self.record();
        self.inner.page_count(path)
    }

    fn split(&self, path: &Path, out_dir: &Path) -> Result<()> {
        self.record();
        self.inner.split(path, out_dir)
    }

    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        self.record();
        self.inner.merge(inputs, output)
    }

    fn optimize(&self, input: &Path, output: &Path) -> Result<()> {
        self.record();
        self.inner.optimize(input, output)
    }

    fn overlay(&self, base: &Path, top: &Path, output: &Path) -> Result<()> {
        self.record();
        self.inner.overlay(base, top, output)
    }
}
