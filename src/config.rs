//! Configuration management for HostsFilter.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{default_sources, Catalog, SourceDef};
use crate::fs_abstraction::{real_fs, FileSystem};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "/etc/hostsfilter/config.yaml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hosts file to manage
    pub hosts_path: PathBuf,

    /// Whitelist file (one domain per line)
    pub whitelist_path: PathBuf,

    /// Sources merged on apply, in precedence order
    pub selected_sources: Vec<String>,

    /// Known blocklist sources
    pub sources: Vec<SourceDef>,

    /// Per-request fetch timeout
    pub fetch_timeout_secs: u64,

    /// Where backups go; next to the hosts file when unset
    pub backup_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts_path: PathBuf::from("/etc/hosts"),
            whitelist_path: PathBuf::from("/etc/hostsfilter/whitelist.txt"),
            selected_sources: Vec::new(),
            sources: default_sources(),
            fetch_timeout_secs: 10,
            backup_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.fetch_timeout_secs == 0 {
            anyhow::bail!("fetch_timeout_secs must be greater than 0");
        }

        let catalog = self.catalog()?;

        for name in &self.selected_sources {
            if !catalog.contains(name) {
                anyhow::bail!(
                    "Selected source '{}' is not defined. Known sources: {}",
                    name,
                    catalog.names().collect::<Vec<_>>().join(", ")
                );
            }
        }

        Ok(())
    }

    /// Build the source catalog from the configured sources
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::new(self.sources.clone()).context("Invalid sources in config")
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Add a source to the selection; `false` if it was already selected
    pub fn select(&mut self, name: &str) -> bool {
        if self.selected_sources.iter().any(|s| s == name) {
            return false;
        }
        self.selected_sources.push(name.to_string());
        true
    }

    /// Remove a source from the selection; `false` if it was not selected
    pub fn deselect(&mut self, name: &str) -> bool {
        let original_len = self.selected_sources.len();
        self.selected_sources.retain(|s| s != name);
        self.selected_sources.len() != original_len
    }

    /// Save configuration to YAML file atomically
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            real_fs()
                .create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        real_fs()
            .write_atomic(path, content.as_bytes())
            .with_context(|| format!("Failed to persist config file: {:?}", path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.hosts_path, PathBuf::from("/etc/hosts"));
        assert_eq!(config.fetch_timeout_secs, 10);
        assert!(config.selected_sources.is_empty());
        assert_eq!(config.sources.len(), 6);
        assert!(config.backup_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("selected_sources: [Spam]\n").unwrap();
        assert_eq!(config.selected_sources, vec!["Spam"]);
        assert_eq!(config.hosts_path, PathBuf::from("/etc/hosts"));
        assert_eq!(config.sources.len(), 6);
    }

    #[test]
    fn test_serialize_deserialize() {
        let mut config = Config::default();
        config.selected_sources = vec!["Spam".to_string(), "No Coin".to_string()];
        config.backup_dir = Some(PathBuf::from("/var/backups/hostsfilter"));

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = Config {
            fetch_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_unknown_selected_source() {
        let config = Config {
            selected_sources: vec!["Bogus".to_string()],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Bogus"));
    }

    #[test]
    fn test_validation_duplicate_source() {
        let mut config = Config::default();
        config.sources.push(SourceDef::new("Spam", "https://example.com/hosts"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_source_in_catalog() {
        let mut config = Config::default();
        config.sources.push(SourceDef::new("Local mirror", "https://mirror.example.com/hosts"));
        config.selected_sources.push("Local mirror".to_string());

        assert!(config.validate().is_ok());
        assert!(config.catalog().unwrap().contains("Local mirror"));
    }

    #[test]
    fn test_select_and_deselect() {
        let mut config = Config::default();
        assert!(config.select("Spam"));
        assert!(!config.select("Spam"));
        assert!(config.select("No Coin"));
        assert_eq!(config.selected_sources, vec!["Spam", "No Coin"]);

        assert!(config.deselect("Spam"));
        assert!(!config.deselect("Spam"));
        assert_eq!(config.selected_sources, vec!["No Coin"]);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/config.yaml");

        let mut config = Config::default();
        config.select("Ads (StevenBlack)");
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_or_default(temp_dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "fetch_timeout_secs: [not, a, number]\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_fetch_timeout() {
        let config = Config {
            fetch_timeout_secs: 3,
            ..Config::default()
        };
        assert_eq!(config.fetch_timeout(), Duration::from_secs(3));
    }
}
