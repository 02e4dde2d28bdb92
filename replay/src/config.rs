//! Replay configuration with TOML file support.

use merit_types::MeritParams;
use merit_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ReplayError;

/// Configuration for a replay run.
///
/// Loaded from a TOML file via [`ReplayConfig::from_toml_file`]; command-line
/// flags and environment variables override individual fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Stop at the first rejected block instead of skipping it.
    #[serde(default)]
    pub fail_fast: bool,

    /// Window and scoring parameters, as a `[params]` table.
    #[serde(default)]
    pub params: MeritParams,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ReplayConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ReplayError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReplayError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ReplayError> {
        let config: Self = toml::from_str(s).map_err(|e| ReplayError::Config(e.to_string()))?;
        config
            .params
            .validate()
            .map_err(|e| ReplayError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ReplayError> {
        toml::to_string_pretty(self).map_err(|e| ReplayError::Config(e.to_string()))
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            fail_fast: false,
            params: MeritParams::default(),
        }
    }
}
