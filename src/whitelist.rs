//! Whitelist file handling.
//!
//! One domain per line; blank lines and `#` comments are ignored. Edits keep
//! comments and ordering, and replace the file atomically.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::fs_abstraction::{real_fs, FileSystem};

/// Parse whitelist text into a set of domains
pub fn parse_whitelist(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Load the whitelist; a missing file is an empty whitelist
pub fn load_whitelist(path: &Path) -> Result<HashSet<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(parse_whitelist(&content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashSet::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read whitelist: {:?}", path)),
    }
}

/// Domains in file order, duplicates included
pub fn list_domains(path: &Path) -> Result<Vec<String>> {
    let content = read_or_empty(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Reject values that cannot round-trip through the whitelist file
pub fn validate_domain(domain: &str) -> Result<()> {
    if domain.is_empty() {
        anyhow::bail!("Domain cannot be empty");
    }
    if domain.chars().any(char::is_whitespace) {
        anyhow::bail!("Domain '{}' must not contain whitespace", domain);
    }
    if domain.contains('#') {
        anyhow::bail!("Domain '{}' must not contain '#'", domain);
    }
    Ok(())
}

/// Append `domain` unless it is already listed.
///
/// Returns `false` when the domain was already present. Creates the file and
/// its parent directory if needed.
pub fn add_domain(path: &Path, domain: &str) -> Result<bool> {
    let domain = domain.trim();
    validate_domain(domain)?;

    let mut content = read_or_empty(path)?;
    if parse_whitelist(&content).contains(domain) {
        return Ok(false);
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(domain);
    content.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        real_fs()
            .create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    save(path, &content)?;
    Ok(true)
}

/// Remove every line equal to `domain`, keeping comments.
///
/// Returns `false` when the domain was not listed.
pub fn remove_domain(path: &Path, domain: &str) -> Result<bool> {
    let domain = domain.trim();
    let content = read_or_empty(path)?;

    let kept: Vec<&str> = content.lines().filter(|line| line.trim() != domain).collect();
    if kept.len() == content.lines().count() {
        return Ok(false);
    }

    let mut updated = kept.join("\n");
    if !updated.is_empty() {
        updated.push('\n');
    }
    save(path, &updated)?;
    Ok(true)
}

fn read_or_empty(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read whitelist: {:?}", path)),
    }
}

fn save(path: &Path, content: &str) -> Result<()> {
    real_fs()
        .write_atomic(path, content.as_bytes())
        .with_context(|| format!("Failed to write whitelist: {:?}", path))
}
