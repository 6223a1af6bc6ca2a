//! CLI command implementations.

pub mod apply;
pub mod diff;
pub mod preview;
pub mod sources;
pub mod whitelist;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::HostsError;
use crate::fetcher::Fetcher;
use crate::fs_abstraction::real_fs;
use crate::hosts::{parse_content, HostEntry, SYSTEM_SOURCE};
use crate::merger::{system_section, SourceMap};
use crate::whitelist::load_whitelist;
use crate::writer::read_current;

/// Everything a merge needs, loaded for one command invocation
pub struct Session {
    pub config: Config,
    pub selection: Vec<String>,
    /// Current hosts file content, empty if the file does not exist
    pub current: String,
    pub system_entries: Vec<HostEntry>,
    pub whitelist: HashSet<String>,
    pub sources: SourceMap,
}

impl Session {
    /// Load config, hosts file and whitelist, then fetch the selected sources.
    ///
    /// `requested` overrides the saved selection when non-empty.
    pub async fn prepare(config_path: &Path, requested: &[String]) -> Result<Self> {
        let config = Config::load_or_default(config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?;
        let catalog = config.catalog()?;
        let selection = resolve_selection(&catalog, &config, requested)?;

        let current = read_current(real_fs(), &config.hosts_path)?;
        let system_entries = parse_content(system_section(&current), SYSTEM_SOURCE);
        info!(
            "Loaded {} entries from {:?}",
            system_entries.len(),
            config.hosts_path
        );

        let whitelist = load_whitelist(&config.whitelist_path)?;

        let sources = if selection.is_empty() {
            SourceMap::new()
        } else {
            let fetcher = Fetcher::new(config.fetch_timeout())?;
            let defs = catalog.resolve(&selection)?;
            fetcher.fetch_sources(&defs).await
        };

        Ok(Self {
            config,
            selection,
            current,
            system_entries,
            whitelist,
            sources,
        })
    }
}

/// Pick the selection for this run, canonicalizing requested names
pub fn resolve_selection(
    catalog: &Catalog,
    config: &Config,
    requested: &[String],
) -> Result<Vec<String>, HostsError> {
    if requested.is_empty() {
        return Ok(config.selected_sources.clone());
    }

    let mut selection: Vec<String> = Vec::with_capacity(requested.len());
    for name in requested {
        let source = catalog
            .find(name)
            .ok_or_else(|| HostsError::UnknownSource(name.clone()))?;
        if !selection.contains(&source.name) {
            selection.push(source.name.clone());
        }
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_selection_uses_saved() {
        let config = Config {
            selected_sources: vec!["Spam".to_string()],
            ..Config::default()
        };
        let catalog = config.catalog().unwrap();

        assert_eq!(resolve_selection(&catalog, &config, &[]).unwrap(), vec!["Spam"]);
    }

    #[test]
    fn test_resolve_selection_canonicalizes_and_dedups() {
        let config = Config::default();
        let catalog = config.catalog().unwrap();
        let requested = vec![
            "no coin".to_string(),
            "Spam".to_string(),
            "No Coin".to_string(),
        ];

        assert_eq!(
            resolve_selection(&catalog, &config, &requested).unwrap(),
            vec!["No Coin", "Spam"]
        );
    }

    #[test]
    fn test_resolve_selection_unknown() {
        let config = Config::default();
        let catalog = config.catalog().unwrap();

        let err = resolve_selection(&catalog, &config, &["Bogus".to_string()]).unwrap_err();
        assert!(matches!(err, HostsError::UnknownSource(_)));
    }

    #[tokio::test]
    async fn test_prepare_without_selection_is_offline() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let hosts = temp_dir.path().join("hosts");
        std::fs::write(&hosts, "127.0.0.1 localhost\n").unwrap();

        let config = Config {
            hosts_path: hosts,
            whitelist_path: temp_dir.path().join("whitelist.txt"),
            ..Config::default()
        };
        let config_path = temp_dir.path().join("config.yaml");
        config.save(&config_path).unwrap();

        let session = Session::prepare(&config_path, &[]).await.unwrap();
        assert!(session.selection.is_empty());
        assert!(session.sources.is_empty());
        assert_eq!(session.system_entries.len(), 1);
        assert_eq!(session.current, "127.0.0.1 localhost\n");
        assert!(session.whitelist.is_empty());
    }
}
