use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{limits, marketplace, retry};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub marketplace: MarketplaceConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/shopscout.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    pub base_url: String,

    pub user_agent: String,

    pub accept_language: String,

    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u32,

    /// Retries for transient upstream errors (default: 3)
    pub max_retries: u32,

    /// Base backoff delay in milliseconds, doubled per retry (default: 1000)
    pub retry_base_delay_ms: u64,

    /// Randomized inter-page delay bounds in milliseconds
    pub page_delay_min_ms: u64,

    pub page_delay_max_ms: u64,

    /// Hard cap on pages per search (default: 10)
    pub max_pages: u32,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            base_url: marketplace::BASE_URL.to_string(),
            user_agent: marketplace::USER_AGENT.to_string(),
            accept_language: marketplace::ACCEPT_LANGUAGE.to_string(),
            request_timeout_seconds: 10,
            max_retries: retry::MAX_RETRIES,
            retry_base_delay_ms: retry::BASE_DELAY.as_millis() as u64,
            page_delay_min_ms: limits::PAGE_DELAY_MIN_MS,
            page_delay_max_ms: limits::PAGE_DELAY_MAX_MS,
            max_pages: limits::MAX_PAGES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 7878,
            cors_allowed_origins: vec![
                "http://localhost:7878".to_string(),
                "http://127.0.0.1:7878".to_string(),
            ],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("shopscout").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".shopscout").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.marketplace.base_url.is_empty() {
            anyhow::bail!("Marketplace base URL cannot be empty");
        }

        if self.marketplace.max_pages == 0 || self.marketplace.max_pages > limits::MAX_PAGES {
            anyhow::bail!("max_pages must be between 1 and {}", limits::MAX_PAGES);
        }

        if self.marketplace.page_delay_min_ms > self.marketplace.page_delay_max_ms {
            anyhow::bail!("page_delay_min_ms cannot exceed page_delay_max_ms");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.marketplace.request_timeout_seconds, 10);
        assert_eq!(config.marketplace.max_retries, 3);
        assert_eq!(config.marketplace.max_pages, 10);
        assert_eq!(config.server.port, 7878);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[marketplace]"));
        assert!(toml_str.contains("[server]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [marketplace]
            max_pages = 3
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.marketplace.max_pages, 3);

        assert_eq!(config.marketplace.base_url, "https://www.amazon.com");
    }

    #[test]
    fn test_validate_rejects_bad_page_bounds() {
        let mut config = Config::default();
        config.marketplace.max_pages = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.marketplace.page_delay_min_ms = 5000;
        config.marketplace.page_delay_max_ms = 100;
        assert!(config.validate().is_err());
    }
}
