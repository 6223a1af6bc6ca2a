//! Blocklist source catalog.
//!
//! Maps a human-readable source name to the URL it is fetched from. The
//! catalog keeps the order it was built with, which is the order sources are
//! listed in the CLI. It is immutable once built and passed around explicitly.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::HostsError;

/// Definition of a blocklist source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDef {
    /// Display name, also the label used in selections and generated output
    pub name: String,

    /// URL to fetch the hosts-formatted list from
    pub url: String,
}

impl SourceDef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Immutable, ordered set of known sources
#[derive(Debug, Clone)]
pub struct Catalog {
    sources: Vec<SourceDef>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate names and non-HTTP URLs
    pub fn new(sources: Vec<SourceDef>) -> Result<Self, HostsError> {
        let mut names = HashSet::new();

        for source in &sources {
            if source.name.trim().is_empty() {
                return Err(HostsError::Catalog("source with empty name".to_string()));
            }
            if !names.insert(source.name.as_str()) {
                return Err(HostsError::Catalog(format!(
                    "duplicate source name '{}'",
                    source.name
                )));
            }
            if !source.url.starts_with("https://") && !source.url.starts_with("http://") {
                return Err(HostsError::Catalog(format!(
                    "source '{}' URL must be http(s): {}",
                    source.name, source.url
                )));
            }
        }

        Ok(Self { sources })
    }

    /// Catalog with the built-in sources
    pub fn builtin() -> Self {
        Self {
            sources: default_sources(),
        }
    }

    /// Look up a source by exact name
    pub fn get(&self, name: &str) -> Option<&SourceDef> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Look up a source ignoring ASCII case
    pub fn find(&self, name: &str) -> Option<&SourceDef> {
        self.get(name)
            .or_else(|| self.sources.iter().find(|s| s.name.eq_ignore_ascii_case(name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceDef> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Resolve a selection to source definitions, keeping selection order.
    ///
    /// Fails on the first name the catalog does not know.
    pub fn resolve<S: AsRef<str>>(&self, selection: &[S]) -> Result<Vec<&SourceDef>, HostsError> {
        selection
            .iter()
            .map(|name| {
                self.get(name.as_ref())
                    .ok_or_else(|| HostsError::UnknownSource(name.as_ref().to_string()))
            })
            .collect()
    }
}

/// Built-in blocklist sources
pub fn default_sources() -> Vec<SourceDef> {
    vec![
        SourceDef::new(
            "Malware (PiHole)",
            "https://raw.githubusercontent.com/davidonzo/Threat-Intel/master/lists/latestdomains.piHole.txt",
        ),
        SourceDef::new("Malware (URLHaus)", "https://urlhaus.abuse.ch/downloads/hostfile/"),
        SourceDef::new(
            "Malware (URLHaus Filter)",
            "https://curben.gitlab.io/malware-filter/urlhaus-filter-hosts.txt",
        ),
        SourceDef::new(
            "Spam",
            "https://raw.githubusercontent.com/FadeMind/hosts.extras/master/add.Spam/hosts",
        ),
        SourceDef::new(
            "No Coin",
            "https://raw.githubusercontent.com/greatis/Anti-WebMiner/master/hosts",
        ),
        SourceDef::new(
            "Ads (StevenBlack)",
            "https://raw.githubusercontent.com/StevenBlack/hosts/master/hosts",
        ),
    ]
}
