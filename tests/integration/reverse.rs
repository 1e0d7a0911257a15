//! End-to-end reverse runs on generated PDFs.

use pdfutils::LopdfEngine;
use pdfutils::config::ReverseConfig;
use pdfutils::output::OutputFormatter;
use pdfutils::pipeline::reverse;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{page_count, page_shows, write_sample_pdf};

fn reverse_config(dir: &TempDir) -> ReverseConfig {
    ReverseConfig {
        file: dir.path().join("input.pdf"),
        output: dir.path().join("reversed.pdf"),
    }
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(12)]
#[tokio::test]
async fn test_reverse_page_order(#[case] pages: usize) {
    let dir = TempDir::new().unwrap();
    let config = reverse_config(&dir);
    write_sample_pdf(&config.file, pages, "Page");

    let summary = reverse::run(&LopdfEngine::new(), &config, None, &OutputFormatter::quiet())
        .await
        .unwrap();

    assert_eq!(summary.pages, pages);
    assert_eq!(page_count(&config.output), pages);
    for n in 1..=pages {
        let expected = format!("Page {}", pages + 1 - n);
        assert!(page_shows(&config.output, n as u32, &expected));
    }
}

#[tokio::test]
async fn test_reverse_twice_restores_order() {
    let dir = TempDir::new().unwrap();
    let config = reverse_config(&dir);
    write_sample_pdf(&config.file, 4, "Page");

    reverse::run(&LopdfEngine::new(), &config, None, &OutputFormatter::quiet())
        .await
        .unwrap();

    let again = ReverseConfig {
        file: config.output.clone(),
        output: dir.path().join("restored.pdf"),
    };
    reverse::run(&LopdfEngine::new(), &again, None, &OutputFormatter::quiet())
        .await
        .unwrap();

    for n in 1..=4u32 {
        assert!(page_shows(&again.output, n, &format!("Page {n}")));
    }
}
