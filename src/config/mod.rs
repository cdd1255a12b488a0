//! Configuration management module
//!
//! Handles the override store, the typed request/deploy configuration and
//! loading it from (substituted) YAML.

pub mod container;
pub mod overrides;
pub mod yaml;

pub use container::{
    ContainerInfo, DockerInfo, DockerParameter, PortMapping, PortType, Volume, VolumeMode,
};
pub use overrides::Overrides;

use crate::system::System;
use container::{finite_or_default, null_as_default};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration file read when `--config-file` is not given
pub const DEFAULT_CONFIG_FILE: &str = "singularity.yml";

/// Fallback for `scheduled-expected-runtime-millis`
pub const DEFAULT_SCHEDULED_EXPECTED_RUNTIME_MILLIS: u64 = 360_000;

/// Fallback for `kill-old-non-long-running-tasks-after-millis`
pub const DEFAULT_KILL_OLD_NON_LONG_RUNNING_TASKS_AFTER_MILLIS: u64 = 10_000;

/// One scheduler request and the deploy that belongs to it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Command run by the deploy
    #[serde(deserialize_with = "null_as_default")]
    pub command: String,

    #[serde(deserialize_with = "null_as_default")]
    pub deploy_id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub request_id: String,

    /// `SERVICE`, `WORKER`, `SCHEDULED`, `ON_DEMAND` or `RUN_ONCE`
    #[serde(deserialize_with = "null_as_default")]
    pub request_type: String,

    /// Cron expression for scheduled requests
    #[serde(deserialize_with = "null_as_default")]
    pub schedule: String,

    #[serde(deserialize_with = "null_as_default")]
    pub num_retries_on_failure: u32,

    #[serde(deserialize_with = "null_as_default")]
    pub kill_old_non_long_running_tasks_after_millis: u64,

    #[serde(deserialize_with = "null_as_default")]
    pub scheduled_expected_runtime_millis: u64,

    /// Email addresses notified about the request
    #[serde(deserialize_with = "null_as_default")]
    pub owners: Vec<String>,

    /// Environment variables for the task
    #[serde(deserialize_with = "null_as_default")]
    pub env: BTreeMap<String, String>,

    #[serde(deserialize_with = "null_as_default")]
    pub resources: Resources,

    #[serde(deserialize_with = "null_as_default")]
    pub arguments: Vec<String>,

    /// Artifacts fetched into the sandbox before the task starts
    #[serde(deserialize_with = "null_as_default")]
    pub uris: Vec<String>,

    /// Agent attributes a task must be placed on
    #[serde(deserialize_with = "null_as_default")]
    pub required_slave_attributes: BTreeMap<String, String>,

    #[serde(deserialize_with = "null_as_default")]
    pub container_info: ContainerInfo,
}

impl Default for Config {
    fn default() -> Self {
        let mut config = Self {
            command: String::new(),
            deploy_id: String::new(),
            request_id: String::new(),
            request_type: String::new(),
            schedule: String::new(),
            num_retries_on_failure: 0,
            kill_old_non_long_running_tasks_after_millis: 0,
            scheduled_expected_runtime_millis: 0,
            owners: Vec::new(),
            env: BTreeMap::new(),
            resources: Resources::default(),
            arguments: Vec::new(),
            uris: Vec::new(),
            required_slave_attributes: BTreeMap::new(),
            container_info: ContainerInfo::default(),
        };
        config.apply_defaults();
        config
    }
}

impl Config {
    /// Parse a configuration from YAML text that has already been substituted
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is not valid YAML
    /// - A value has the wrong type for its field
    #[inline]
    pub fn load(yaml: &str) -> anyhow::Result<Self> {
        yaml::parse_config(yaml)
    }

    /// Read, substitute and parse a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The substituted text cannot be parsed
    #[inline]
    pub fn load_from_file(
        system: &dyn System,
        path: &str,
        overrides: &Overrides,
    ) -> anyhow::Result<Self> {
        yaml::load_config(system, path, overrides)
    }

    /// Replace zero-valued defaultable fields with their fallback constants
    #[inline]
    pub fn apply_defaults(&mut self) {
        if self.scheduled_expected_runtime_millis == 0 {
            self.scheduled_expected_runtime_millis = DEFAULT_SCHEDULED_EXPECTED_RUNTIME_MILLIS;
        }
        if self.kill_old_non_long_running_tasks_after_millis == 0 {
            self.kill_old_non_long_running_tasks_after_millis =
                DEFAULT_KILL_OLD_NON_LONG_RUNNING_TASKS_AFTER_MILLIS;
        }
        if self.container_info.docker.network.trim().is_empty() {
            self.container_info.docker.network = container::DEFAULT_DOCKER_NETWORK.to_owned();
        }
    }
}

/// Resources reserved for each task of the deploy
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase", deserialize = "kebab-case"))]
pub struct Resources {
    #[serde(deserialize_with = "finite_or_default")]
    pub cpus: f64,
    #[serde(deserialize_with = "finite_or_default")]
    pub memory_mb: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_ports: u32,
    #[serde(deserialize_with = "finite_or_default")]
    pub disk_mb: f64,
}

impl Resources {
    /// Nothing requested at all
    #[must_use]
    #[inline]
    #[allow(clippy::float_cmp, reason = "Exact zero means unset")]
    pub fn is_empty(&self) -> bool {
        self.cpus == 0.0 && self.memory_mb == 0.0 && self.num_ports == 0 && self.disk_mb == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_fallbacks_applied() {
        let config = Config::default();
        assert_eq!(
            config.scheduled_expected_runtime_millis,
            DEFAULT_SCHEDULED_EXPECTED_RUNTIME_MILLIS
        );
        assert_eq!(
            config.kill_old_non_long_running_tasks_after_millis,
            DEFAULT_KILL_OLD_NON_LONG_RUNNING_TASKS_AFTER_MILLIS
        );
        assert!(config.container_info.volumes.is_empty());
        assert!(!config.container_info.is_configured());
    }

    #[test]
    fn apply_defaults_keeps_explicit_values() {
        let mut config = Config {
            scheduled_expected_runtime_millis: 42,
            kill_old_non_long_running_tasks_after_millis: 7,
            ..Config::default()
        };
        config.apply_defaults();

        assert_eq!(config.scheduled_expected_runtime_millis, 42);
        assert_eq!(config.kill_old_non_long_running_tasks_after_millis, 7);
    }

    #[test]
    fn resources_empty_only_when_all_zero() {
        assert!(Resources::default().is_empty());
        let resources = Resources {
            num_ports: 1,
            ..Resources::default()
        };
        assert!(!resources.is_empty());
    }
}
