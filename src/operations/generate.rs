//! Generate operation coordination
//!
//! read → substitute → parse → render → validate → write, with the
//! validation of both documents finished before either file is written.

use crate::cli::Args;
use crate::config::Config;
use crate::error::GenError;
use crate::operations::render::{DocumentKind, RenderedDocument, Templates, render};
use crate::operations::validate::validate_all;
use crate::system::System;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Coordinates one complete generation run
#[non_exhaustive]
pub struct GenerateOperation<'src> {
    config: Config,
    templates: Templates,
    output_dir: PathBuf,
    dry_run: bool,
    system: &'src dyn System,
}

impl<'src> GenerateOperation<'src> {
    /// Create a generate operation from CLI arguments
    ///
    /// Parses the overrides and loads the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A `--var` argument is malformed
    /// - The configuration file cannot be read or parsed
    #[inline]
    pub fn new(args: &Args, system: &'src dyn System) -> Result<Self> {
        let overrides = args.overrides()?;
        debug!(count = overrides.len(), "Parsed overrides");

        let config = Config::load_from_file(system, &args.config_file, &overrides)?;

        Ok(Self {
            config,
            templates: Templates::default(),
            output_dir: PathBuf::from(&args.output_dir),
            dry_run: args.dry_run,
            system,
        })
    }

    /// The loaded configuration
    #[must_use]
    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Render, validate and write (or print, for a dry run) both documents
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A document cannot be rendered
    /// - Either document is not valid JSON
    /// - An output file cannot be written
    #[inline]
    pub fn execute(&self) -> Result<()> {
        let documents = generate(&self.config, &self.templates)?;

        if self.dry_run {
            info!("Dry run preview - no files will be written:");
            for document in &documents {
                info!("{}", self.output_dir.join(document.file_name()).display());
                println!("{}", document.json);
            }
            return Ok(());
        }

        emit(self.system, &self.output_dir, &documents)
    }
}

/// Render and validate the request and deploy documents
///
/// # Errors
///
/// Returns an error if:
/// - A template cannot be rendered
/// - Either rendered document is not valid JSON
#[inline]
pub fn generate(config: &Config, templates: &Templates) -> Result<Vec<RenderedDocument>> {
    let documents = DocumentKind::ALL
        .iter()
        .map(|&kind| render(templates, kind, config))
        .collect::<Result<Vec<_>, _>>()?;

    validate_all(&documents)?;

    Ok(documents)
}

/// Write every document into `output_dir`
///
/// All documents are validated first. Nothing is written unless every one of
/// them is valid JSON.
///
/// # Errors
///
/// Returns an error if:
/// - Any document is not valid JSON
/// - The output path exists but is not a directory
/// - The output directory cannot be created
/// - A file cannot be written
#[inline]
pub fn emit(system: &dyn System, output_dir: &Path, documents: &[RenderedDocument]) -> Result<()> {
    validate_all(documents)?;

    let dir_exists = system.exists(output_dir).map_err(|err| {
        GenError::write(format!(
            "Unable to check output directory: {}. {err}",
            output_dir.display()
        ))
    })?;
    if !dir_exists {
        system.create_dir_all(output_dir).map_err(|err| {
            GenError::write(format!(
                "Unable to create output directory: {}. {err}",
                output_dir.display()
            ))
        })?;
    } else if !system.is_dir(output_dir).map_err(|err| {
        GenError::write(format!(
            "Unable to check output directory: {}. {err}",
            output_dir.display()
        ))
    })? {
        return Err(GenError::write(format!(
            "Output path is not a directory: {}",
            output_dir.display()
        ))
        .into());
    }

    for document in documents {
        let path = output_dir.join(document.file_name());
        let bytes = document.as_bytes();
        system.write(&path, bytes).map_err(|err| {
            GenError::write(format!("Unable to write file: {}. {err}", path.display()))
        })?;
        info!(bytes = bytes.len(), filename = %path.display(), "File created");
    }

    Ok(())
}
