//! # pdfutils
//!
//! Overlay, reverse, and compress PDF documents.
//!
//! The crate orchestrates a PDF engine ([`engine::LopdfEngine`]) through
//! three pipelines:
//!
//! - [`pipeline::overlay`] combines two documents page by page and appends
//!   the longer document's remaining pages
//! - [`pipeline::reverse`] writes a document's pages in reverse order
//! - [`pipeline::compress`] tries several strategies and keeps the smallest
//!   result
//!
//! Every run works inside its own temporary [`workspace::WorkingArea`] and
//! only touches the output path once the result is complete.

pub mod cli;
pub mod config;
pub mod engine;
mod error;
pub use error::*;
pub mod io;
pub mod output;
pub mod pipeline;
pub(crate) mod utils;
pub mod workspace;

pub use config::{Config, OverlayMode, Task};
pub use engine::{LopdfEngine, PdfEngine};
pub use output::{OutputFormatter, RunReport};

/// Version of the pdfutils library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the library.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the configured task with the `lopdf` engine.
pub async fn run(config: &Config, formatter: &OutputFormatter) -> Result<RunReport> {
    run_with_engine(&LopdfEngine::new(), config, formatter).await
}

/// Run the configured task with a given engine and print its summary.
pub async fn run_with_engine(
    engine: &dyn PdfEngine,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<RunReport> {
    config.validate()?;
    let temp_root = config.temp_root();

    formatter.debug(&format!(
        "{NAME} v{VERSION}: {} -> {}",
        config.task.name(),
        config.task.output().display()
    ));

    let report = match &config.task {
        Task::Overlay(task) => RunReport::Overlay(
            pipeline::overlay::run(engine, task, temp_root, formatter).await?,
        ),
        Task::Reverse(task) => RunReport::Reverse(
            pipeline::reverse::run(engine, task, temp_root, formatter).await?,
        ),
        Task::Compress(task) => RunReport::Compress(
            pipeline::compress::run(engine, task, temp_root, formatter).await?,
        ),
    };

    output::display_report(formatter, &report);
    Ok(report)
}
