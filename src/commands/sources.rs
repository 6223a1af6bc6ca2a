//! Sources command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::SourcesAction;
use crate::config::Config;
use crate::error::HostsError;

/// Run the sources command
pub async fn run(action: SourcesAction, config_path: &Path) -> Result<()> {
    match action {
        SourcesAction::List => list_sources(config_path),
        SourcesAction::Select { name } => select_source(&name, config_path),
        SourcesAction::Deselect { name } => deselect_source(&name, config_path),
    }
}

/// List known sources, marking the saved selection
fn list_sources(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let catalog = config.catalog()?;

    println!();
    println!("Blocklist sources ({}):", catalog.len());
    println!();
    for source in catalog.iter() {
        let marker = if config.selected_sources.contains(&source.name) {
            "[x]"
        } else {
            "[ ]"
        };
        println!("  {} {}", marker, source.name);
        println!("      {}", source.url);
    }

    if !config.selected_sources.is_empty() {
        println!();
        println!("Precedence: {}", config.selected_sources.join(" > "));
    }
    println!();

    Ok(())
}

/// Add a source to the saved selection
fn select_source(name: &str, config_path: &Path) -> Result<()> {
    let mut config = Config::load_or_default(config_path)?;
    let catalog = config.catalog()?;

    let canonical = catalog
        .find(name)
        .map(|s| s.name.clone())
        .ok_or_else(|| HostsError::UnknownSource(name.to_string()))?;

    if !config.select(&canonical) {
        println!("{} is already selected", canonical);
        return Ok(());
    }

    config
        .save(config_path)
        .with_context(|| format!("Failed to save config to {:?}", config_path))?;
    println!("[OK] Selected {}", canonical);

    Ok(())
}

/// Remove a source from the saved selection
fn deselect_source(name: &str, config_path: &Path) -> Result<()> {
    let mut config = Config::load_or_default(config_path)?;
    let catalog = config.catalog()?;

    let canonical = catalog
        .find(name)
        .map_or_else(|| name.to_string(), |s| s.name.clone());

    if !config.deselect(&canonical) {
        println!("{} was not selected", canonical);
        return Ok(());
    }

    config
        .save(config_path)
        .with_context(|| format!("Failed to save config to {:?}", config_path))?;
    println!("[OK] Deselected {}", canonical);

    Ok(())
}
