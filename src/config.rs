//! Configuration module
//!
//! TOML application configuration, loaded from
//! `~/.config/expirysync/config.toml` (or `EXPIRYSYNC_CONFIG`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub store: StoreConfig,
    pub refresh: RefreshSection,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for the REST API
    pub api_host: String,
    /// Listen port for the REST API
    pub api_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite file path, used when `url` is not set
    pub path: String,
    /// Full connection URL override
    pub url: Option<String>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "./expirysync.db".to_string(),
            url: None,
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}?mode=rwc", self.path),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Output format: "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Store seeding and profile defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Seed the demo product set on first start (empty store only)
    pub seed_demo_data: bool,
    pub manager_name: String,
    pub manager_email: String,
    pub manager_role: String,
    pub store_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            manager_name: "Store Manager".to_string(),
            manager_email: "manager@expirysync.com".to_string(),
            manager_role: "admin".to_string(),
            store_name: "Main Store".to_string(),
        }
    }
}

/// Derived-field refresh sweep settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshSection {
    /// Sweep interval in seconds
    pub interval_secs: u64,
}

impl Default for RefreshSection {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

/// Default config file location: `~/.config/expirysync/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("expirysync")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.store.seed_demo_data);
        assert_eq!(cfg.refresh.interval_secs, 30);
        assert_eq!(
            cfg.database.connection_url(),
            "sqlite://./expirysync.db?mode=rwc"
        );
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            api_port = 9090

            [store]
            store_name = "Depot 7"
            seed_demo_data = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.store.store_name, "Depot 7");
        assert!(!cfg.store.seed_demo_data);
        assert_eq!(cfg.logging.format, "text");
    }

    #[test]
    fn url_override_beats_path() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [database]
            path = "./ignored.db"
            url = "sqlite::memory:"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.database.connection_url(), "sqlite::memory:");
    }
}
