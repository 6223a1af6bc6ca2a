//! Diff command implementation.

use anyhow::Result;
use std::path::Path;

use super::Session;
use crate::diff::generate_diff;
use crate::merger::merge_entries;

/// Run the diff command
pub async fn run(sources: Vec<String>, config_path: &Path) -> Result<()> {
    let session = Session::prepare(config_path, &sources).await?;

    let merged = merge_entries(
        &session.system_entries,
        &session.whitelist,
        &session.selection,
        &session.sources,
    );

    let hosts = session.config.hosts_path.display();
    let diff = generate_diff(
        &session.current,
        &merged.content,
        &format!("{} (current)", hosts),
        &format!("{} (new)", hosts),
    );

    if diff.is_empty() {
        println!("No changes");
    } else {
        for line in &diff {
            println!("{}", line);
        }
    }

    Ok(())
}
