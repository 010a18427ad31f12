//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded and any command-line overrides applied.

use std::net::SocketAddr;

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `addr` is not a socket address
    /// - `recent_limit` is 0 or exceeds 100
    /// - `request_timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `template_dir` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = self.addr.parse::<SocketAddr>() {
            return Err(ConfigError::Invalid { field: "addr".into(), reason: e.to_string() });
        }

        if self.recent_limit == 0 {
            return Err(ConfigError::Invalid { field: "recent_limit".into(), reason: "must be greater than 0".into() });
        }
        if self.recent_limit > 100 {
            return Err(ConfigError::Invalid { field: "recent_limit".into(), reason: "must not exceed 100".into() });
        }

        if self.request_timeout_ms < 100 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_ms".into(),
                reason: "must be at least 100ms".into(),
            });
        }
        if self.request_timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.template_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "template_dir".into(), reason: "must not be empty".into() });
        }

        if self.static_dir == self.template_dir {
            tracing::warn!(
                dir = %self.static_dir.display(),
                "static_dir and template_dir are the same; \
                 template sources will be publicly served"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_addr() {
        let config = AppConfig { addr: ":4000".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "addr"));
    }

    #[test]
    fn test_validate_recent_limit_zero() {
        let config = AppConfig { recent_limit: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "recent_limit"));
    }

    #[test]
    fn test_validate_recent_limit_exceeds_limit() {
        let config = AppConfig { recent_limit: 101, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "recent_limit"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { request_timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "request_timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { request_timeout_ms: 301_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "request_timeout_ms"));
    }

    #[test]
    fn test_validate_empty_template_dir() {
        let config = AppConfig { template_dir: PathBuf::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "template_dir"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { recent_limit: 1, request_timeout_ms: 100, ..Default::default() };
        assert!(config.validate().is_ok());

        let config = AppConfig { recent_limit: 100, request_timeout_ms: 300_000, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_shared_dirs_only_warns() {
        let config = AppConfig { static_dir: PathBuf::from("./ui"), template_dir: PathBuf::from("./ui"), ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
