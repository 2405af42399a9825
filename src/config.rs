//! Configuration Management
//!
//! Where the Rancher API lives and which key pair to use. Values come from
//! `<config_dir>/rancher-api/config.json`, overridden by `RANCHER_URL`,
//! `RANCHER_ACCESS_KEY` and `RANCHER_SECRET_KEY`.

use crate::rancher::auth::{ApiCredentials, ACCESS_KEY_ENV, SECRET_KEY_ENV};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the API root URL
pub const URL_ENV: &str = "RANCHER_URL";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// API root, e.g. `http://rancher.local:8080/v1/projects/1a5/`
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rancher-api").join("config.json"))
    }

    /// Load configuration from disk, then apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Load configuration from a specific file; missing or unreadable files
    /// yield the default configuration
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config {:?}: {}", path, e);
                Self::default()
            },
        }
    }

    /// Overlay non-empty values from `lookup` (normally the environment)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = get(URL_ENV) {
            self.url = Some(url);
        }
        if let Some(key) = get(ACCESS_KEY_ENV) {
            self.access_key = Some(key);
        }
        if let Some(key) = get(SECRET_KEY_ENV) {
            self.secret_key = Some(key);
        }
    }

    /// API key pair, if both halves are configured
    pub fn credentials(&self) -> Option<ApiCredentials> {
        ApiCredentials::from_parts(self.access_key.as_deref(), self.secret_key.as_deref())
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("rancher-api-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load_from(&temp_path("does-not-exist.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path("roundtrip/config.json");
        let config = Config {
            url: Some("http://rancher.local:8080/v1".to_string()),
            access_key: Some("ak".to_string()),
            secret_key: Some("sk".to_string()),
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_is_default() {
        let path = temp_path("malformed.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("RANCHER_URL", "http://override:8080/v1"),
            ("RANCHER_ACCESS_KEY", ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config {
            url: Some("http://file:8080/v1".to_string()),
            access_key: Some("from-file".to_string()),
            secret_key: None,
        };
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.url.as_deref(), Some("http://override:8080/v1"));
        assert_eq!(config.access_key.as_deref(), Some("from-file"));
        assert!(config.credentials().is_none());
    }
}
