//! `singularity-gen` - Generate Singularity request and deploy JSON from YAML
//!
//! The configuration file is treated as text first: `{{name}}` placeholders
//! are replaced with `--var name=value` overrides, and only then is the
//! result parsed as YAML. The typed configuration is rendered into the
//! request and deploy documents, both documents are checked to be valid JSON,
//! and only then are `singularity-request.json` and `singularity-deploy.json`
//! written.

pub mod cli;
pub mod config;
pub mod error;
pub mod operations;
pub mod system;

use anyhow::Result;
use cli::Args;
use operations::GenerateOperation;
use system::{RealSystem, System};

/// Main entry point for the singularity-gen library
///
/// # Errors
///
/// Returns an error if any stage of the pipeline fails.
#[inline]
pub fn run(args: &Args) -> Result<()> {
    run_with_system(args, &RealSystem)
}

/// Run the pipeline against an explicit [`System`]
///
/// # Errors
///
/// Returns an error if any stage of the pipeline fails.
#[inline]
pub fn run_with_system(args: &Args, system: &dyn System) -> Result<()> {
    let operation = GenerateOperation::new(args, system)?;
    operation.execute()
}
