//! JSON fragment builders
//!
//! Each builder returns either an empty string, when its source value is
//! empty, or one complete object member with a trailing comma:
//!
//! ```text
//! "name": <value>,
//! ```
//!
//! Templates place optional fragments before a member that is always
//! present, so the trailing comma never ends up in front of a closing brace.

use crate::config::{Config, ContainerInfo, Resources};
use crate::error::GenError;
use serde::Serialize;
use std::collections::BTreeMap;

/// A value whose fragment should be omitted entirely
pub trait IsEmpty {
    /// Whether the value carries nothing worth emitting
    fn is_empty(&self) -> bool;
}

impl IsEmpty for Resources {
    #[inline]
    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }
}

impl IsEmpty for ContainerInfo {
    #[inline]
    fn is_empty(&self) -> bool {
        !self.is_configured()
    }
}

/// Escape `value` for use inside a double-quoted JSON string
///
/// `"` becomes `\"`. Backslashes and control characters are escaped too.
#[must_use]
#[inline]
pub fn escape(value: &str) -> String {
    let quoted = quote(value);
    quoted[1..quoted.len() - 1].to_owned()
}

/// Escape `value` and wrap it in double quotes
#[must_use]
#[inline]
pub fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}

/// `"name": "value",` or nothing for an empty string
#[must_use]
#[inline]
pub fn string_fragment(name: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!("\"{name}\": {},", quote(value))
}

/// `"name": ["a","b"],` or nothing for an empty list
#[must_use]
#[inline]
pub fn list_fragment(name: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    format!("\"{name}\": [{}],", list_items(items))
}

/// `"name": {"k1":"v1","k2":"v2"},` or nothing for an empty map
///
/// Members come out in key order.
#[must_use]
#[inline]
pub fn map_fragment(name: &str, map: &BTreeMap<String, String>) -> String {
    if map.is_empty() {
        return String::new();
    }
    format!("\"{name}\": {{{}}},", map_members(map))
}

/// `"name": <serialized record>,` or nothing when the record is empty
///
/// # Errors
///
/// Returns an error if:
/// - The record cannot be serialized to JSON
#[inline]
pub fn record_fragment<T>(name: &str, record: &T) -> Result<String, GenError>
where
    T: Serialize + IsEmpty,
{
    if record.is_empty() {
        return Ok(String::new());
    }
    let json = serde_json::to_string(record)
        .map_err(|e| GenError::render(format!("Unable to serialize '{name}': {e}")))?;
    Ok(format!("\"{name}\": {json},"))
}

/// Quoted, comma-separated list items without the brackets
#[must_use]
#[inline]
pub fn list_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| quote(item))
        .collect::<Vec<_>>()
        .join(",")
}

/// Comma-separated `"key":"value"` members without the braces
#[must_use]
#[inline]
pub fn map_members(map: &BTreeMap<String, String>) -> String {
    map.iter()
        .map(|(key, value)| format!("{}:{}", quote(key), quote(value)))
        .collect::<Vec<_>>()
        .join(",")
}

#[must_use]
#[inline]
pub fn owners(config: &Config) -> String {
    list_fragment("owners", &config.owners)
}

#[must_use]
#[inline]
pub fn required_slave_attributes(config: &Config) -> String {
    map_fragment("requiredSlaveAttributes", &config.required_slave_attributes)
}

#[must_use]
#[inline]
pub fn schedule(config: &Config) -> String {
    string_fragment("schedule", &config.schedule)
}

#[must_use]
#[inline]
pub fn command(config: &Config) -> String {
    string_fragment("command", &config.command)
}

#[must_use]
#[inline]
pub fn env(config: &Config) -> String {
    map_fragment("env", &config.env)
}

#[must_use]
#[inline]
pub fn arguments(config: &Config) -> String {
    list_fragment("arguments", &config.arguments)
}

#[must_use]
#[inline]
pub fn uris(config: &Config) -> String {
    list_fragment("uris", &config.uris)
}

/// # Errors
///
/// Returns an error if:
/// - The resources cannot be serialized
#[inline]
pub fn resources(config: &Config) -> Result<String, GenError> {
    record_fragment("resources", &config.resources)
}

/// Built only when a container type is configured
///
/// # Errors
///
/// Returns an error if:
/// - The container description cannot be serialized
#[inline]
pub fn container_info(config: &Config) -> Result<String, GenError> {
    record_fragment("containerInfo", &config.container_info)
}
