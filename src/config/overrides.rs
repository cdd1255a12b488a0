//! Key-value override store
//!
//! Built from repeated `--var KEY=VALUE` arguments and used as the variable
//! table for placeholder substitution in the raw configuration text.

use crate::error::GenError;
use std::collections::HashMap;

/// Delimiter between an override's key and its value
pub const VAR_DELIMITER: char = '=';

/// Substitution variables supplied on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    vars: HashMap<String, String>,
}

impl Overrides {
    /// Create an empty override store
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from raw `KEY=VALUE` arguments, later keys winning
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any argument has no `=` delimiter
    #[inline]
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, GenError> {
        let mut overrides = Self::new();
        for arg in args {
            overrides.set(arg.as_ref())?;
        }
        Ok(overrides)
    }

    /// Parse a raw `KEY=VALUE` override and store it
    ///
    /// Only the first `=` splits, so values may contain `=` themselves.
    /// A repeated key replaces the earlier value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The argument has no `=` delimiter
    #[inline]
    pub fn set(&mut self, raw: &str) -> Result<(), GenError> {
        let Some((key, value)) = raw.split_once(VAR_DELIMITER) else {
            return Err(GenError::override_format(format!(
                "There were not two parts to the var: '{raw}'. \
                 The correct format is: key{VAR_DELIMITER}value"
            )));
        };
        self.vars.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    /// Look up the value stored for `key`
    #[must_use]
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Number of stored overrides
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no overrides were supplied
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The underlying variable table
    #[must_use]
    #[inline]
    pub const fn as_map(&self) -> &HashMap<String, String> {
        &self.vars
    }
}
