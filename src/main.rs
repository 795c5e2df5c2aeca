// Allow common clippy pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! Resource client CLI
//!
//! Command-line interface for managing a remote resource collection

use clap::Parser;
use resource_client::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

// The blocking client owns its runtime, so main stays synchronous
fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
