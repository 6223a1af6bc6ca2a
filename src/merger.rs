//! Merge of system entries with selected blocklists.
//!
//! Every domain ends up in the generated section at most once, credited to
//! the first source (in selection order) and the first entry (in fetch order)
//! that claims it. Domains already present in the system entries are never
//! generated, and whitelisted domains are skipped and counted.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::hosts::{HostEntry, BLOCK_ADDRESS};

/// Parsed entries per source label, as filled in by the fetcher
pub type SourceMap = HashMap<String, Vec<HostEntry>>;

pub const SYSTEM_HEADER: &str = "### SYSTEM ENTRIES (PRESERVED) ###";
pub const BLOCKLIST_HEADER: &str = "### BLOCKLIST ENTRIES (GENERATED) ###";
pub const GENERATED_BY: &str = "# Generated by HostsFilter";
const SOURCE_PREFIX: &str = "# Source: ";

/// Merged file content plus the counters gathered while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    pub content: String,
    pub blocked_domains: usize,
    pub whitelisted_skipped: usize,
}

/// Preview numbers for a selection, without building any text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub system_lines: usize,
    pub new_blocked_domains: usize,
    pub whitelisted_skipped: usize,
}

/// Call-scoped dedup state shared by [`merge_entries`] and [`preview_stats`].
struct DedupPass<'a> {
    seen: HashSet<&'a str>,
    whitelist: &'a HashSet<String>,
    whitelisted_skipped: usize,
}

impl<'a> DedupPass<'a> {
    fn new(system_entries: &'a [HostEntry], whitelist: &'a HashSet<String>) -> Self {
        let seen = system_entries
            .iter()
            .flat_map(|e| e.domains.iter().map(String::as_str))
            .collect();
        Self {
            seen,
            whitelist,
            whitelisted_skipped: 0,
        }
    }

    /// Claim the entry's domains in order, handing each survivor to `keep`.
    ///
    /// A kept domain is marked seen immediately, so a repeat later in the same
    /// entry is dropped too.
    fn claim(&mut self, entry: &'a HostEntry, mut keep: impl FnMut(&'a str)) {
        for domain in &entry.domains {
            let domain = domain.as_str();
            if self.seen.contains(domain) {
                continue;
            }
            if self.whitelist.contains(domain) {
                self.whitelisted_skipped += 1;
                continue;
            }
            self.seen.insert(domain);
            keep(domain);
        }
    }
}

/// Build the new hosts file content.
///
/// Selected sources missing from `sources` are skipped without error: they
/// have not been fetched, so they contribute nothing.
pub fn merge_entries<S: AsRef<str>>(
    system_entries: &[HostEntry],
    whitelist: &HashSet<String>,
    selection: &[S],
    sources: &SourceMap,
) -> MergeResult {
    let mut lines: Vec<String> = Vec::with_capacity(system_entries.len() + 4);

    lines.push(SYSTEM_HEADER.to_string());
    lines.extend(system_entries.iter().map(HostEntry::to_line));
    lines.push(String::new());

    lines.push(BLOCKLIST_HEADER.to_string());
    lines.push(GENERATED_BY.to_string());

    let mut pass = DedupPass::new(system_entries, whitelist);
    let mut blocked_domains = 0;

    for label in selection {
        let label: &str = label.as_ref();
        let Some(entries) = sources.get(label) else {
            continue;
        };

        lines.push(format!("{}{}", SOURCE_PREFIX, label));
        for entry in entries {
            let mut kept = Vec::new();
            pass.claim(entry, |domain| kept.push(domain.to_string()));

            if !kept.is_empty() {
                blocked_domains += kept.len();
                lines.push(HostEntry::new(BLOCK_ADDRESS, kept, label).to_line());
            }
        }
        lines.push(String::new());
    }

    MergeResult {
        content: lines.join("\n"),
        blocked_domains,
        whitelisted_skipped: pass.whitelisted_skipped,
    }
}

/// Count what [`merge_entries`] would produce for the same arguments.
pub fn preview_stats<S: AsRef<str>>(
    system_entries: &[HostEntry],
    whitelist: &HashSet<String>,
    selection: &[S],
    sources: &SourceMap,
) -> MergeStats {
    let mut pass = DedupPass::new(system_entries, whitelist);
    let mut new_blocked_domains = 0;

    let selected = selection.iter().filter_map(|label| {
        let label: &str = label.as_ref();
        sources.get(label)
    });

    for entries in selected {
        for entry in entries {
            pass.claim(entry, |_| new_blocked_domains += 1);
        }
    }

    MergeStats {
        system_lines: system_entries.len(),
        new_blocked_domains,
        whitelisted_skipped: pass.whitelisted_skipped,
    }
}

/// Sources in `selection` that have no slot in `sources`
pub fn missing_sources<S: AsRef<str>>(selection: &[S], sources: &SourceMap) -> Vec<String> {
    let mut missing = Vec::new();
    for label in selection {
        let label: &str = label.as_ref();
        if !sources.contains_key(label) {
            missing.push(label.to_string());
        }
    }
    missing
}

/// The part of a hosts file that predates any generated section.
///
/// A file written by [`merge_entries`] is cut at its blocklist header, so
/// re-applying replaces the old generated entries instead of preserving them
/// as system entries.
pub fn system_section(content: &str) -> &str {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.trim() == BLOCKLIST_HEADER {
            return &content[..offset];
        }
        offset += line.len();
    }
    content
}
