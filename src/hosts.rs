//! Hosts file entries: parsing and rendering.
//!
//! The same grammar is used for the local `/etc/hosts` file and for the
//! third-party blocklists: `ADDRESS DOMAIN [DOMAIN]... [# COMMENT]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Source label given to entries parsed from the local hosts file
pub const SYSTEM_SOURCE: &str = "System";

/// Address used for every generated blocklist line (null route)
pub const BLOCK_ADDRESS: &str = "0.0.0.0";

/// Column width the address is padded to when rendering
const ADDRESS_WIDTH: usize = 15;

/// A single hosts line: one address mapped to one or more domains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEntry {
    pub address: String,
    pub domains: Vec<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub source: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl HostEntry {
    /// Create an enabled entry without comment
    pub fn new(address: impl Into<String>, domains: Vec<String>, source: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            domains,
            comment: None,
            source: source.into(),
            enabled: true,
        }
    }

    /// Attach an inline comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Mark the entry as disabled (rendered fully commented out)
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Render the entry as a hosts file line.
    ///
    /// Disabled entries become `# address domains...` and lose their comment.
    pub fn to_line(&self) -> String {
        if !self.enabled {
            return format!("# {} {}", self.address, self.domains.join(" "));
        }

        let mut line = format!(
            "{:<width$} {}",
            self.address,
            self.domains.join(" "),
            width = ADDRESS_WIDTH
        );
        if let Some(ref comment) = self.comment {
            line.push_str(" # ");
            line.push_str(comment);
        }
        line
    }
}

impl fmt::Display for HostEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Parse hosts-formatted content into entries, in file order.
///
/// Malformed lines (fewer than two tokens) are dropped silently: blocklists
/// are untrusted third-party text and a bad line must never fail the run.
pub fn parse_content(content: &str, source: &str) -> Vec<HostEntry> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (data, comment) = match line.split_once('#') {
            Some((data, rest)) => {
                let rest = rest.trim();
                (data.trim(), (!rest.is_empty()).then(|| rest.to_string()))
            }
            None => (line, None),
        };

        let mut tokens = data.split_whitespace();
        let (Some(address), Some(first)) = (tokens.next(), tokens.next()) else {
            skipped += 1;
            continue;
        };

        let mut domains = vec![first.to_string()];
        domains.extend(tokens.map(str::to_string));

        entries.push(HostEntry {
            address: address.to_string(),
            domains,
            comment,
            source: source.to_string(),
            enabled: true,
        });
    }

    if skipped > 0 {
        trace!("{}: skipped {} malformed lines", source, skipped);
    }

    entries
}

/// Count every domain across a list of entries
pub fn count_domains(entries: &[HostEntry]) -> usize {
    entries.iter().map(|e| e.domains.len()).sum()
}
