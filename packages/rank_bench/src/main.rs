#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Runs the standard benchmark suite and prints the report to stdout.
//!
//! There are no options. Command-line arguments are ignored. Diagnostics go to stderr and are
//! controlled by `RUST_LOG` (default `warn`).

use std::io;
use std::process::ExitCode;

use rank_bench::{Harness, Suite};
use tracing_subscriber::EnvFilter;

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match Suite::standard().run(&Harness::new()) {
        Ok(report) => {
            report.print_to_stdout();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
