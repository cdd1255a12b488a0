//! Container description for a deploy
//!
//! These records are read from dash-cased YAML keys and serialized straight
//! into the deploy document with the scheduler's camelCase member names.

use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::BTreeMap;

/// Network mode used when the configuration does not name one
pub const DEFAULT_DOCKER_NETWORK: &str = "BRIDGE";

/// Container settings for the deploy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase", deserialize = "kebab-case"))]
pub struct ContainerInfo {
    /// Containerizer type, e.g. `DOCKER`. Empty means no container at all.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub container_type: String,

    /// Volume mounts, emitted as `[]` when none are configured
    #[serde(deserialize_with = "null_as_default")]
    pub volumes: Vec<Volume>,

    /// Docker-specific settings, omitted when no image is set
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "DockerInfo::is_empty"
    )]
    pub docker: DockerInfo,
}

impl ContainerInfo {
    /// Whether a container type has been configured
    #[must_use]
    #[inline]
    pub fn is_configured(&self) -> bool {
        !self.container_type.trim().is_empty()
    }
}

/// Docker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase", deserialize = "kebab-case"))]
pub struct DockerInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,

    /// Network mode (`BRIDGE`, `HOST`, `NONE`)
    #[serde(deserialize_with = "null_as_default")]
    pub network: String,

    #[serde(deserialize_with = "null_as_default")]
    pub privileged: bool,

    #[serde(alias = "forcepullimage", deserialize_with = "null_as_default")]
    pub force_pull_image: bool,

    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub parameters: BTreeMap<String, String>,

    /// Extra low-level `docker run` parameters
    #[serde(
        alias = "dockerParameters",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub docker_parameters: Vec<DockerParameter>,

    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub port_mappings: Vec<PortMapping>,
}

impl DockerInfo {
    /// No image means there is nothing to run
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.image.trim().is_empty()
    }
}

impl Default for DockerInfo {
    fn default() -> Self {
        Self {
            image: String::new(),
            network: DEFAULT_DOCKER_NETWORK.to_owned(),
            privileged: false,
            force_pull_image: false,
            parameters: BTreeMap::new(),
            docker_parameters: Vec::new(),
            port_mappings: Vec::new(),
        }
    }
}

/// A single `docker run` parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerParameter {
    pub key: String,
    pub value: String,
}

/// How a port number is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortType {
    /// The port number is used as-is
    #[default]
    Literal,
    /// The port number is an index into the ports offered to the task
    FromOffer,
}

/// Mapping from a container port to a host port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "kebab-case"))]
pub struct PortMapping {
    #[serde(default)]
    pub container_port_type: PortType,
    pub container_port: u32,
    #[serde(default)]
    pub host_port_type: PortType,
    pub host_port: u32,
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

/// Access mode of a volume mount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeMode {
    #[default]
    Ro,
    Rw,
}

/// Host path mounted into the container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "kebab-case"))]
pub struct Volume {
    pub container_path: String,
    pub host_path: String,
    #[serde(default)]
    pub mode: VolumeMode,
}

fn default_protocol() -> String {
    return "tcp".to_owned();
}

/// Treat an explicit YAML `null` (e.g. `owners:` with nothing after it) the
/// same as a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like [`null_as_default`] for numbers, rejecting `.nan` and `.inf`
///
/// JSON has no spelling for non-finite numbers, so they would otherwise be
/// written as `null`.
pub(crate) fn finite_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or_default();
    if !value.is_finite() {
        return Err(de::Error::custom(format!("expected a finite number, found {value}")));
    }
    Ok(value)
}
