//! pdfutils - overlay, reverse, and compress PDF documents.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use pdfutils::cli::Cli;
use pdfutils::output::OutputFormatter;
use pdfutils::PdfToolError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfToolError> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    let report = pdfutils::run(&config, &formatter).await?;

    if config.json {
        println!("{}", report.to_json()?);
    }

    Ok(())
}

/// Log to stderr so stdout carries only progress lines or the JSON report.
///
/// `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "pdfutils=debug,warn" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
