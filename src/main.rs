//! # `singularity-gen`
//!
//! Turns a YAML description of a Singularity request and deploy into the two
//! JSON documents the Singularity API expects.
//!
//! ## Usage
//!
//! ```sh
//! singularity-gen --config-file singularity.yml --var IMAGE=busybox:1.36
//! ```
//!
//! Writes `singularity-request.json` and `singularity-deploy.json` to the
//! current directory (or `--output-dir`). Nothing is written unless both
//! documents are valid JSON.

use anyhow::Result;
use clap::Parser as _;
use singularity_gen::cli::{Args, normalize_single_dash};
use singularity_gen::error::GenError;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse_from(normalize_single_dash(std::env::args_os()));

    // RUST_LOG wins over --debug
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // stdout carries the --dry-run JSON
    fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();

    match singularity_gen::run(&args) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<GenError>()
                    .map_or(1, GenError::exit_code),
            );
        }
    }
}
