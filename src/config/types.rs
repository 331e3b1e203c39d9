//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::listen::ListenConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Server configuration.
///
/// Every table is optional; an empty file yields [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server-wide settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Capacity and admission limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        if let Err(errors) = super::validate(&config) {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ConfigError::Invalid(joined));
        }
        Ok(config)
    }
}

/// Server-wide settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// Prometheus metrics HTTP port. Absent or 0 disables the endpoint.
    pub metrics_port: Option<u16>,
}
