//! YAML configuration loading and parsing

use crate::config::{Config, Overrides};
use crate::error::GenError;
use crate::operations::substitute::{placeholders, substitute};
use crate::system::System;
use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::debug;

/// Read a configuration file, substitute overrides into it and parse it
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The substituted text is not a valid configuration
#[inline]
pub fn load_config(system: &dyn System, path: &str, overrides: &Overrides) -> Result<Config> {
    let path_obj = Path::new(path);

    let exists = system
        .exists(path_obj)
        .with_context(|| format!("Failed to check configuration file: {path}"))?;
    if !exists {
        return Err(GenError::read(format!(
            "Configuration file not found: {path}\n\
            Create a singularity.yml file or specify a different path with --config-file"
        ))
        .into());
    }

    let raw = system.read_to_string(path_obj).map_err(|err| {
        GenError::read(format!("Unable to read configuration file: {path}. {err}"))
    })?;
    debug!(path, yaml = %raw, "Read YAML config file");

    let substituted = substitute(&raw, overrides.as_map());
    let unresolved = placeholders(&substituted);
    if !unresolved.is_empty() {
        debug!(?unresolved, "Placeholders left without a matching --var");
    }
    debug!(yaml = %substituted, "Substituted YAML config");

    let config = parse_config(&substituted)
        .with_context(|| format!("Failed to load configuration file: {path}"))?;
    debug!(?config, "Unmarshalled config");

    Ok(config)
}

/// Parse substituted YAML text into a [`Config`] with defaults applied
///
/// An empty document (or one holding only comments) yields the default
/// configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The text is not valid YAML
/// - A value does not match the type of its field
/// - A resource number is `.nan` or infinite
#[inline]
pub fn parse_config(yaml: &str) -> Result<Config> {
    if is_blank(yaml) {
        return Ok(Config::default());
    }

    // A lone `~` or `null` document deserializes to `None`
    let parsed: Option<Config> = serde_yaml::from_str(yaml).map_err(|e| parse_error(&e))?;
    let Some(mut config) = parsed else {
        return Ok(Config::default());
    };
    config.apply_defaults();

    Ok(config)
}

/// No YAML document at all, only whitespace and comments
fn is_blank(yaml: &str) -> bool {
    yaml.lines().map(str::trim).all(|line| line.is_empty() || line.starts_with('#'))
}

fn parse_error(err: &serde_yaml::Error) -> GenError {
    // Extract line and column information from serde_yaml error
    if let Some(location) = err.location() {
        GenError::parse(format!(
            "Unable to unmarshal YAML at line {}, column {}: {err}",
            location.line(),
            location.column(),
        ))
    } else {
        GenError::parse(format!("Unable to unmarshal YAML: {err}"))
    }
}
