//! End-to-end compression runs on generated PDFs.

use pdfutils::LopdfEngine;
use pdfutils::config::CompressConfig;
use pdfutils::output::{AttemptOutcome, OutputFormatter};
use pdfutils::pipeline::compress;
use tempfile::TempDir;

use crate::common::{page_count, page_shows, write_sample_pdf};

#[tokio::test]
async fn test_compress_never_grows_and_keeps_pages() {
    let dir = TempDir::new().unwrap();
    let config = CompressConfig {
        file: dir.path().join("input.pdf"),
        output: dir.path().join("out").join("compressed.pdf"),
    };
    write_sample_pdf(&config.file, 6, "Body");
    let original_size = std::fs::metadata(&config.file).unwrap().len();

    let report = compress::run(&LopdfEngine::new(), &config, None, &OutputFormatter::quiet())
        .await
        .unwrap();

    assert_eq!(report.original_size, original_size);
    assert!(report.final_size <= original_size);
    assert_eq!(
        std::fs::metadata(&config.output).unwrap().len(),
        report.final_size
    );
    assert_eq!(report.pages, 6);
    assert_eq!(page_count(&config.output), 6);
    assert!(page_shows(&config.output, 6, "Body 6"));

    let names: Vec<&str> = report.attempts.iter().map(|a| a.strategy).collect();
    assert_eq!(
        names,
        vec!["direct-optimize", "split-remerge", "iterative-optimize"]
    );
    assert!(
        report
            .attempts
            .iter()
            .all(|a| !matches!(a.outcome, AttemptOutcome::Failed { .. }))
    );
}

#[tokio::test]
async fn test_compress_in_place() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.pdf");
    write_sample_pdf(&path, 2, "Doc");
    let config = CompressConfig {
        file: path.clone(),
        output: path.clone(),
    };

    let report = compress::run(&LopdfEngine::new(), &config, None, &OutputFormatter::quiet())
        .await
        .unwrap();

    assert_eq!(std::fs::metadata(&path).unwrap().len(), report.final_size);
    assert_eq!(page_count(&path), 2);
}
