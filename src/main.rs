//! Sinetab CLI
//!
//! # Usage
//!
//! ```bash
//! # Fixed table
//! sinetab generate --bits 8 --samples 300 --output half_sine_table.v
//!
//! # Search for the best sample count
//! sinetab optimize --bits 10 --calls 60
//!
//! # All bit widths from 2 to 16, with the growth curve
//! sinetab sweep --format json
//!
//! # Full pipeline from YAML
//! sinetab run pipeline.yaml
//! ```

use clap::Parser;
use sinetab::cli::{run_command, Cli};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr so command output stays machine-readable
fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
