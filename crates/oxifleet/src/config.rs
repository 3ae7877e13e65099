//! Configuration management for oxifleet.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "oxifleet";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "oxifleet.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `OXIFLEET_`, with `__` between
///    section and field, e.g. `OXIFLEET_API__LISTEN_ADDR`)
/// 2. TOML config file at `~/.config/oxifleet/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Collection-query service and client configuration.
    pub api: ApiConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/oxifleet/oxifleet.db`
    pub database_path: Option<PathBuf>,
}

/// Collection-query service and client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Address the `oxifleet-api` service listens on.
    pub listen_addr: String,
    /// Base URL the data-access client sends requests to.
    pub base_url: String,
    /// Route prefix stripped from incoming request paths.
    pub route_prefix: String,
    /// Path to the collection document served by the endpoint.
    /// When unset, the built-in seed dataset is served.
    pub dataset_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8787".to_string(),
            base_url: "http://127.0.0.1:8787/api".to_string(),
            route_prefix: "/api".to_string(),
            dataset_path: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `OXIFLEET_`). Sections are
    ///    separated from field names with a double underscore so that field
    ///    names containing `_` survive: `OXIFLEET_API__LISTEN_ADDR` maps to
    ///    `api.listen_addr`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("OXIFLEET_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.api.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(Error::ConfigValidation {
                message: format!("invalid listen address: {}", self.api.listen_addr),
            });
        }

        if self.api.base_url.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "base_url must not be empty".to_string(),
            });
        }

        if !self.api.route_prefix.is_empty() && !self.api.route_prefix.starts_with('/') {
            return Err(Error::ConfigValidation {
                message: format!(
                    "route_prefix must start with '/': {}",
                    self.api.route_prefix
                ),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the parsed listen address for the collection-query service.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured address does not parse. `validate`
    /// catches this earlier in normal startup paths.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.api
            .listen_addr
            .parse()
            .map_err(|_| Error::ConfigValidation {
                message: format!("invalid listen address: {}", self.api.listen_addr),
            })
    }
}
