//! Configuration module
//!
//! TOML file loaded from `~/.config/evnet-console/config.toml` by
//! default; the path can be overridden with `EVNET_CONFIG` or the
//! `--config` flag, individual values with CLI flags.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

/// Network backend connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend REST API
    pub base_url: String,
    /// Bearer token sent with every request, when set
    pub api_token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Attempts per GET before a transport error is surfaced
    pub max_retries: u32,
    /// Initial backoff delay between retries
    pub retry_delay_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            api_token: None,
            timeout_secs: 10,
            max_retries: 3,
            retry_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Default config location: `<config dir>/evnet-console/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("evnet-console")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_parses() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [backend]
            base_url = "https://api.evnet.example/v1"
            api_token = "secret"
            timeout_secs = 5
            max_retries = 2
            retry_delay_ms = 100

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.backend.base_url, "https://api.evnet.example/v1");
        assert_eq!(cfg.backend.api_token.as_deref(), Some("secret"));
        assert_eq!(cfg.backend.timeout_secs, 5);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [backend]
            base_url = "https://api.evnet.example/v1"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.backend.timeout_secs, 10);
        assert_eq!(cfg.backend.max_retries, 3);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.backend.base_url, "http://localhost:8080/api/v1");
        assert!(cfg.backend.api_token.is_none());
    }

    #[test]
    fn default_path_points_into_the_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("evnet-console/config.toml"));
    }
}
