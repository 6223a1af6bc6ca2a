//! Apply command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use super::Session;
use crate::diff::{count_changes, generate_diff};
use crate::error::HostsError;
use crate::fs_abstraction::real_fs;
use crate::merger::{merge_entries, missing_sources};
use crate::utils::{format_count_with_separator, is_root};
use crate::writer::write_with_backup;

/// Run the apply command
pub async fn run(sources: Vec<String>, dry_run: bool, config_path: &Path) -> Result<()> {
    let session = Session::prepare(config_path, &sources).await?;
    apply_session(session, dry_run, config_path)
}

/// Merge, write and persist the selection for an already prepared session
fn apply_session(mut session: Session, dry_run: bool, config_path: &Path) -> Result<()> {
    let hosts_path = session.config.hosts_path.clone();

    if session.selection.is_empty() {
        warn!(
            "No blocklists selected. This will revert {:?} to system entries only.",
            hosts_path
        );
    }

    let missing = missing_sources(&session.selection, &session.sources);
    if !missing.is_empty() {
        return Err(HostsError::MissingSourceData(missing).into());
    }

    let empty: Vec<&str> = session
        .selection
        .iter()
        .filter(|name| session.sources.get(*name).is_some_and(Vec::is_empty))
        .map(String::as_str)
        .collect();
    if !empty.is_empty() {
        warn!("No entries from {}, continuing without them", empty.join(", "));
    }

    info!("Merging {} sources...", session.selection.len());
    let merged = merge_entries(
        &session.system_entries,
        &session.whitelist,
        &session.selection,
        &session.sources,
    );

    let diff = generate_diff(
        &session.current,
        &merged.content,
        &format!("{} (current)", hosts_path.display()),
        &format!("{} (new)", hosts_path.display()),
    );
    let (added, removed) = count_changes(&diff);

    println!(
        "Blocked domains: {} (whitelisted, skipped: {})",
        format_count_with_separator(merged.blocked_domains),
        format_count_with_separator(merged.whitelisted_skipped)
    );
    println!(
        "Changes: +{} -{} lines",
        format_count_with_separator(added),
        format_count_with_separator(removed)
    );

    if dry_run {
        println!("[DRY-RUN] {:?} not modified", hosts_path);
        return Ok(());
    }

    if diff.is_empty() {
        println!("{:?} is already up to date", hosts_path);
    } else {
        if !is_root() {
            warn!("Not running as root, writing {:?} will likely fail", hosts_path);
        }

        let backup = write_with_backup(
            real_fs(),
            &hosts_path,
            &merged.content,
            session.config.backup_dir.as_deref(),
            chrono::Local::now(),
        )?;

        if let Some(backup) = backup {
            println!("Backup: {:?}", backup);
        }
        println!("[OK] Wrote {:?}", hosts_path);
    }

    if session.config.selected_sources != session.selection {
        session.config.selected_sources = std::mem::take(&mut session.selection);
        session
            .config
            .save(config_path)
            .with_context(|| format!("Failed to save selection to {:?}", config_path))?;
    }

    Ok(())
}
