//! Integration tests for error handling and edge cases.

use std::path::PathBuf;

use pdfutils::config::{CompressConfig, Config, OverlayConfig, OverlayMode, ReverseConfig, Task};
use pdfutils::output::OutputFormatter;
use pdfutils::{ErrorCategory, PdfToolError, run_with_engine};
use tempfile::TempDir;

use crate::common::{RecordingEngine, write_sample_pdf};

async fn run_task(engine: &RecordingEngine, task: Task) -> pdfutils::Result<()> {
    run_with_engine(engine, &Config::new(task), &OutputFormatter::quiet())
        .await
        .map(|_| ())
}

#[tokio::test]
async fn test_nonexistent_input_makes_no_engine_calls() {
    let dir = TempDir::new().unwrap();
    let engine = RecordingEngine::new();

    let err = run_task(
        &engine,
        Task::Reverse(ReverseConfig {
            file: PathBuf::from("/nonexistent/file.pdf"),
            output: dir.path().join("out.pdf"),
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PdfToolError::FileNotFound { .. }));
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(err.exit_code(), 2);
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_overlay_second_input_missing() {
    let dir = TempDir::new().unwrap();
    let file1 = dir.path().join("a.pdf");
    write_sample_pdf(&file1, 1, "A");
    let engine = RecordingEngine::new();

    let err = run_task(
        &engine,
        Task::Overlay(OverlayConfig {
            file1,
            file2: dir.path().join("missing.pdf"),
            output: dir.path().join("out.pdf"),
            mode: OverlayMode::Stamp,
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PdfToolError::FileNotFound { .. }));
    assert_eq!(engine.calls(), 0);
    assert!(!dir.path().join("out.pdf").exists());
}

#[tokio::test]
async fn test_empty_path_argument() {
    let dir = TempDir::new().unwrap();
    let engine = RecordingEngine::new();

    let err = run_task(
        &engine,
        Task::Compress(CompressConfig {
            file: PathBuf::new(),
            output: dir.path().join("out.pdf"),
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PdfToolError::EmptyPath { argument: "file" }));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_zero_byte_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.pdf");
    std::fs::File::create(&input).unwrap();
    let engine = RecordingEngine::new();

    let err = run_task(
        &engine,
        Task::Compress(CompressConfig {
            file: input,
            output: dir.path().join("out.pdf"),
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PdfToolError::EmptyFile { .. }));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_unparseable_input_is_source_read() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("garbage.pdf");
    std::fs::write(&input, b"this is not a pdf document").unwrap();
    let output = dir.path().join("out.pdf");
    let engine = RecordingEngine::new();

    let err = run_task(
        &engine,
        Task::Reverse(ReverseConfig {
            file: input,
            output: output.clone(),
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PdfToolError::SourceRead { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_output_is_directory() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.pdf");
    write_sample_pdf(&input, 1, "In");
    let engine = RecordingEngine::new();

    let err = run_task(
        &engine,
        Task::Reverse(ReverseConfig {
            file: input,
            output: dir.path().to_path_buf(),
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PdfToolError::OutputWrite { .. }));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn test_missing_temp_root_is_config_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.pdf");
    write_sample_pdf(&input, 1, "In");
    let engine = RecordingEngine::new();

    let mut config = Config::new(Task::Reverse(ReverseConfig {
        file: input,
        output: dir.path().join("out.pdf"),
    }));
    config.temp_root = Some(dir.path().join("no-such-dir"));

    let err = run_with_engine(&engine, &config, &OutputFormatter::quiet())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfToolError::InvalidConfig { .. }));
    assert_eq!(engine.calls(), 0);
}
