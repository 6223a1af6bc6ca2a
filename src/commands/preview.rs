//! Preview command implementation.

use anyhow::Result;
use std::path::Path;

use super::Session;
use crate::merger::preview_stats;
use crate::utils::format_count_with_separator;

/// Run the preview command
pub async fn run(sources: Vec<String>, json: bool, config_path: &Path) -> Result<()> {
    let session = Session::prepare(config_path, &sources).await?;

    if session.selection.is_empty() {
        println!("No sources selected");
        return Ok(());
    }

    let stats = preview_stats(
        &session.system_entries,
        &session.whitelist,
        &session.selection,
        &session.sources,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!();
    println!("Preview for {}:", session.selection.join(", "));
    println!(
        "  System lines (preserved): {}",
        format_count_with_separator(stats.system_lines)
    );
    println!(
        "  New blocked domains:      {}",
        format_count_with_separator(stats.new_blocked_domains)
    );
    println!(
        "  Whitelisted (skipped):    {}",
        format_count_with_separator(stats.whitelisted_skipped)
    );

    let empty: Vec<&str> = session
        .selection
        .iter()
        .filter(|name| session.sources.get(*name).map_or(true, Vec::is_empty))
        .map(String::as_str)
        .collect();
    if !empty.is_empty() {
        println!();
        println!("  No entries from: {}", empty.join(", "));
    }
    println!();

    Ok(())
}
