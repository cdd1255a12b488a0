use crate::config::{DEFAULT_CONFIG_FILE, Overrides};
use crate::error::GenError;
use clap::Parser;
use std::ffi::OsString;

/// Long options that take a value, accepted as `-name value` or `-name=value`
const VALUE_FLAGS: [&str; 3] = ["config-file", "var", "output-dir"];

/// Long switches, accepted as `-name`
const SWITCH_FLAGS: [&str; 2] = ["debug", "dry-run"];

/// Command-line arguments for singularity-gen
#[derive(Parser, Debug, Clone)]
#[command(name = "singularity-gen")]
#[command(about = "Generate Singularity request and deploy JSON from a YAML configuration")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(long = "config-file", value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    /// Enable debug logging output
    #[arg(long)]
    pub debug: bool,

    /// Substitution variable in KEY=VALUE format (can be specified multiple times)
    /// Replaces {{KEY}} in the configuration file before it is parsed
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Directory the JSON files are written to
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: String,

    /// Print the generated JSON instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Parse the `--var` arguments into an override store
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A `--var` argument has no `=` delimiter
    #[inline]
    pub fn overrides(&self) -> Result<Overrides, GenError> {
        Overrides::from_args(&self.vars)
    }
}

/// Rewrite single-dash long options such as `-config-file` to `--config-file`
///
/// Only the option names this tool defines are touched. An argument that is
/// the value of a preceding option is passed through as is, so
/// `--var -debug` still sets a variable named `-debug`.
#[must_use]
pub fn normalize_single_dash<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut expects_value = false;
    args.into_iter()
        .map(|arg| {
            let arg = arg.into();
            if core::mem::take(&mut expects_value) {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(name) = text.strip_prefix('-').filter(|rest| !rest.starts_with('-')) else {
                expects_value = text
                    .strip_prefix("--")
                    .is_some_and(|flag| VALUE_FLAGS.contains(&flag));
                return arg;
            };

            let known = match name.split_once('=') {
                Some((flag, _)) => VALUE_FLAGS.contains(&flag),
                None if VALUE_FLAGS.contains(&name) => {
                    expects_value = true;
                    true
                }
                None => SWITCH_FLAGS.contains(&name),
            };
            if known { format!("-{text}").into() } else { arg }
        })
        .collect()
}
