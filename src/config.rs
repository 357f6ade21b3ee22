//! Configuration file support for risk-dashboard
//!
//! This module handles parsing `.risk-dashboard.toml` files that select the data
//! provider and configure the web server. Risk tier thresholds are fixed and
//! cannot be configured.
//!
//! ## Configuration File Format
//!
//! ```toml
//! # .risk-dashboard.toml
//!
//! [provider]
//! # Simulated round trip of the built-in mock provider
//! delay_ms = 1000
//!
//! # Fetch scores from this URL instead of the mock
//! endpoint = "https://example.com/api/risk"
//!
//! # Request timeout for the HTTP provider
//! timeout_secs = 10
//!
//! [server]
//! port = 3000
//! open_browser = true
//!
//! # API endpoint URL for the frontend (useful for separate deployments)
//! api_endpoint = "https://example.com"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::provider::{FetchError, HttpRiskProvider, MockRiskProvider, RiskDataProvider};

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Data provider configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Mock provider delay in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// HTTP endpoint serving a JSON array of risk entries
    #[serde(default)]
    pub endpoint: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    /// Build the configured provider: HTTP when an endpoint is set, mock otherwise
    pub fn build(&self) -> Result<Arc<dyn RiskDataProvider>, FetchError> {
        match &self.endpoint {
            Some(url) => {
                let provider =
                    HttpRiskProvider::new(url.clone(), Duration::from_secs(self.timeout_secs))?;
                debug!(url = provider.url(), "using HTTP risk provider");
                Ok(Arc::new(provider))
            }
            None => {
                let provider = MockRiskProvider::new(Duration::from_millis(self.delay_ms));
                debug!(delay = ?provider.delay(), "using sample risk provider");
                Ok(Arc::new(provider))
            }
        }
    }
}

/// Web server configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_open_browser")]
    pub open_browser: bool,

    #[serde(default)]
    pub api_endpoint: Option<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_open_browser() -> bool {
    true
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            open_browser: default_open_browser(),
            api_endpoint: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub server: ServerSection,
}

/// Load configuration starting from the given path
///
/// A file path is read directly. A directory is searched for
/// `.risk-dashboard.toml` in it and its parents; defaults apply when none exists.
pub fn load_config(start: &Path) -> Result<DashboardConfig, ConfigError> {
    let config_path = if start.is_file() {
        Some(start.to_path_buf())
    } else {
        find_config_file(start)
    };

    match config_path {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: DashboardConfig = toml::from_str(&content)?;
            Ok(config)
        }
        None => Ok(DashboardConfig::default()),
    }
}

/// Find the config file by searching up the directory tree
fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let config_names = [".risk-dashboard.toml", "risk-dashboard.toml"];

    let mut current = start_path.to_path_buf();

    loop {
        for name in &config_names {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Move to parent directory
        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.provider.delay_ms, 1000);
        assert_eq!(config.provider.timeout_secs, 10);
        assert!(config.provider.endpoint.is_none());
        assert_eq!(config.server.port, 3000);
        assert!(config.server.open_browser);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [provider]
            delay_ms = 250
            endpoint = "http://localhost:8080/risk"

            [server]
            port = 8000
            open_browser = false
        "#;

        let config: DashboardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.provider.delay_ms, 250);
        assert_eq!(
            config.provider.endpoint.as_deref(),
            Some("http://localhost:8080/risk")
        );
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.server.port, 8000);
        assert!(!config.server.open_browser);
    }

    #[test]
    fn test_provider_selection() {
        let mock = ProviderConfig::default().build().unwrap();
        assert_eq!(mock.name(), "mock");

        let http = ProviderConfig {
            endpoint: Some("http://localhost:8080/risk".to_string()),
            ..ProviderConfig::default()
        }
        .build()
        .unwrap();
        assert_eq!(http.name(), "http");
    }

    #[test]
    fn test_load_config_searches_parents() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".risk-dashboard.toml"),
            "[server]\nport = 4000\n",
        )
        .unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config(&nested).unwrap();
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[provider]\ndelay_ms = 5\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.provider.delay_ms, 5);
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[provider\n").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::ParseError(_))));
    }
}
