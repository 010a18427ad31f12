//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SNIPBOX_*)
//! 2. TOML config file (if SNIPBOX_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_RECENT_LIMIT;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SNIPBOX_*)
/// 2. TOML config file (if SNIPBOX_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    ///
    /// Set via SNIPBOX_ADDR environment variable.
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Path to the SQLite snippet database.
    ///
    /// Set via SNIPBOX_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Directory holding `*.page.*`, `*.layout.*` and `*.partial.*` templates.
    ///
    /// Set via SNIPBOX_TEMPLATE_DIR environment variable.
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Directory served under `/static/`.
    ///
    /// Set via SNIPBOX_STATIC_DIR environment variable.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Number of snippets shown on the home page.
    ///
    /// Set via SNIPBOX_RECENT_LIMIT environment variable.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Per-request deadline in milliseconds.
    ///
    /// Set via SNIPBOX_REQUEST_TIMEOUT_MS environment variable.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_addr() -> String {
    "127.0.0.1:4000".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./snipbox.sqlite")
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("./ui/html")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./ui/static")
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            db_path: default_db_path(),
            template_dir: default_template_dir(),
            static_dir: default_static_dir(),
            recent_limit: default_recent_limit(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Request deadline as Duration for the HTTP timeout layer.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SNIPBOX_`
    /// 2. TOML file from `SNIPBOX_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// The result is not validated yet so callers can apply command-line
    /// overrides first; call [`AppConfig::validate`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadFailed` if the configuration file cannot be
    /// read or a value cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SNIPBOX_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SNIPBOX_")
                .ignore(&["config_file"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))
    }
}
