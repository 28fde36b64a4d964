//! CLI binary for pipeline diagnostics

mod cli;

use anyhow::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Run CLI
    cli::run()
}
